use std::path::PathBuf;
use std::str::FromStr;

use marketdeck_core::{csv_file_name, normalize, to_csv, Interval, MarketDataSource};
use serde_json::{json, Value};

use crate::cli::ExportArgs;
use crate::error::CliError;

use super::CommandContext;

pub async fn run(args: &ExportArgs, ctx: &CommandContext) -> Result<Value, CliError> {
    let symbol = ctx.parse_symbol(&args.symbol)?;
    let interval = Interval::from_str(&args.interval)?;
    let range = super::resolve_range(&args.start, &args.end)?;

    let raw = ctx.source.history(&symbol, range, interval).await?;
    let series = normalize(raw)?;

    let payload = to_csv(&series);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(csv_file_name(&symbol)));
    std::fs::write(&output, &payload)?;

    eprintln!("✓ Exported {} rows to {}", series.len(), output.display());

    Ok(json!({
        "symbol": symbol,
        "rows": series.len(),
        "output": output.display().to_string(),
        "exported": true,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use marketdeck_core::{
        CacheMode, CachedSource, FetchCache, Session, SymbolUniverse, YahooAdapter,
    };

    use super::*;

    fn fixture_context() -> CommandContext {
        CommandContext {
            source: CachedSource::new(
                Arc::new(YahooAdapter::default()),
                FetchCache::disabled(),
                CacheMode::Bypass,
            ),
            universe: SymbolUniverse::default(),
            session: Session::new(),
        }
    }

    #[tokio::test]
    async fn writes_a_csv_file_named_for_the_symbol() {
        let dir = tempfile::tempdir().expect("temp dir");
        let output = dir.path().join("GOOGL.csv");

        let args = ExportArgs {
            symbol: String::from("googl"),
            start: Some(String::from("2020-01-01")),
            end: Some(String::from("2020-01-10")),
            interval: String::from("1d"),
            output: Some(output.clone()),
        };

        let result = run(&args, &fixture_context()).await.expect("export succeeds");
        assert_eq!(result["exported"], true);
        assert_eq!(result["rows"], 8);

        let written = std::fs::read_to_string(output).expect("file exists");
        assert!(written.starts_with("Date,Open,High,Low,Close,Volume\n"));
        assert!(written.ends_with('\n'));
    }
}
