use std::str::FromStr;

use marketdeck_core::{ChartKind, DashboardInput, Interval};
use serde_json::Value;

use crate::cli::{ChartArg, RenderArgs};
use crate::error::CliError;

use super::CommandContext;

pub async fn run(args: &RenderArgs, ctx: &mut CommandContext) -> Result<Value, CliError> {
    let symbol = ctx.parse_symbol(&args.symbol)?;
    let interval = Interval::from_str(&args.interval)?;
    let range = super::resolve_range(&args.start, &args.end)?;

    for raw in &args.watch {
        let watched = ctx.parse_symbol(raw)?;
        ctx.session.watchlist.add(watched);
    }

    let input = DashboardInput {
        symbol,
        range,
        interval,
        chart: match args.chart {
            ChartArg::Line => ChartKind::Line,
            ChartArg::Candlestick => ChartKind::Candlestick,
        },
        metric: args.metric.clone(),
    };

    let view = marketdeck_core::render(&input, &ctx.source, &ctx.session).await?;

    Ok(serde_json::to_value(&view)?)
}
