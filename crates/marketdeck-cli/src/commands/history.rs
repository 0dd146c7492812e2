use std::str::FromStr;

use marketdeck_core::{normalize, Interval, MarketDataSource};
use serde_json::Value;

use crate::cli::HistoryArgs;
use crate::error::CliError;

use super::CommandContext;

pub async fn run(args: &HistoryArgs, ctx: &CommandContext) -> Result<Value, CliError> {
    let symbol = ctx.parse_symbol(&args.symbol)?;
    let interval = Interval::from_str(&args.interval)?;
    let range = super::resolve_range(&args.start, &args.end)?;

    let raw = ctx.source.history(&symbol, range, interval).await?;
    let series = normalize(raw)?;

    Ok(serde_json::to_value(&series)?)
}
