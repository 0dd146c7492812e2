use marketdeck_core::{metrics_index, select_metric, to_bar_by_year, MarketDataSource};
use serde_json::{json, Value};

use crate::cli::MetricsArgs;
use crate::error::CliError;

use super::CommandContext;

pub async fn run(args: &MetricsArgs, ctx: &CommandContext) -> Result<Value, CliError> {
    let symbol = ctx.parse_symbol(&args.symbol)?;
    let statement = ctx.source.financials(&symbol).await?;

    match &args.metric {
        Some(label) => {
            let series = select_metric(&statement, label)?;
            let bars = to_bar_by_year(&series);
            Ok(json!({
                "symbol": symbol,
                "metric": series.metric,
                "years": bars.years,
                "values": bars.values,
            }))
        }
        None => Ok(json!({
            "symbol": symbol,
            "metrics": metrics_index(&statement),
        })),
    }
}
