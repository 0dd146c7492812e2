use marketdeck_core::{quote_cards, MarketDataSource, QuoteSnapshot};
use serde_json::{json, Value};

use crate::cli::QuoteArgs;
use crate::error::CliError;

use super::CommandContext;

pub async fn run(args: &QuoteArgs, ctx: &CommandContext) -> Result<Value, CliError> {
    let symbol = ctx.parse_symbol(&args.symbol)?;
    let info = ctx.source.quote(&symbol).await?;

    // Missing fields degrade per-card to N/A; only transport failures
    // surface as errors.
    let snapshot = QuoteSnapshot::from_info_lossy(&info);
    let cards = quote_cards(&info);

    Ok(json!({
        "symbol": symbol,
        "snapshot": snapshot,
        "cards": cards,
    }))
}
