use marketdeck_core::watchlist_rows;
use serde_json::{json, Value};

use crate::cli::WatchArgs;
use crate::error::CliError;

use super::CommandContext;

pub async fn run(args: &WatchArgs, ctx: &mut CommandContext) -> Result<Value, CliError> {
    for raw in &args.symbols {
        let symbol = ctx.parse_symbol(raw)?;
        ctx.session.watchlist.add(symbol);
    }

    let rows = watchlist_rows(&ctx.session, &ctx.source).await;

    Ok(json!({
        "session": ctx.session.id(),
        "rows": rows,
    }))
}
