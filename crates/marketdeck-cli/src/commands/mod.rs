mod export;
mod history;
mod metrics;
mod quote;
mod render;
mod watch;

use std::sync::Arc;
use std::time::Duration;

use marketdeck_core::{
    CacheMode, CachedSource, DateRange, FetchCache, HttpClient, NoopHttpClient,
    ReqwestHttpClient, Session, Symbol, SymbolUniverse, TradingDate, YahooAdapter,
};
use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Per-invocation state shared by all commands: the cached data source,
/// the configured symbol universe, and one session. The CLI's session
/// lives for one process; a long-lived UI would hold one per connection.
pub struct CommandContext {
    pub source: CachedSource,
    pub universe: SymbolUniverse,
    pub session: Session,
}

impl CommandContext {
    pub fn parse_symbol(&self, input: &str) -> Result<Symbol, CliError> {
        let symbol = Symbol::parse(input)?;
        self.universe.validate(&symbol)?;
        Ok(symbol)
    }
}

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let mut ctx = build_context(cli)?;

    match &cli.command {
        Command::Quote(args) => quote::run(args, &ctx).await,
        Command::History(args) => history::run(args, &ctx).await,
        Command::Metrics(args) => metrics::run(args, &ctx).await,
        Command::Watch(args) => watch::run(args, &mut ctx).await,
        Command::Export(args) => export::run(args, &ctx).await,
        Command::Render(args) => render::run(args, &mut ctx).await,
    }
}

fn build_context(cli: &Cli) -> Result<CommandContext, CliError> {
    let http_client: Arc<dyn HttpClient> = if cli.offline {
        Arc::new(NoopHttpClient)
    } else {
        Arc::new(ReqwestHttpClient::new())
    };
    let adapter = Arc::new(YahooAdapter::with_http_client(http_client));

    let cache = if cli.no_cache {
        FetchCache::disabled()
    } else {
        FetchCache::new(Duration::from_secs(cli.cache_ttl_secs))
    };
    let mode = if cli.no_cache {
        CacheMode::Bypass
    } else if cli.refresh {
        CacheMode::Refresh
    } else {
        CacheMode::Use
    };

    let universe = match &cli.universe {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            SymbolUniverse::from_lines(text.lines())
        }
        None => SymbolUniverse::default(),
    };

    debug!(offline = cli.offline, ?mode, "constructed data source");

    Ok(CommandContext {
        source: CachedSource::new(adapter, cache, mode),
        universe,
        session: Session::new(),
    })
}

/// Resolve the requested window: end defaults to today, start to one year
/// before the end (the dashboard's default view).
pub fn resolve_range(
    start: &Option<String>,
    end: &Option<String>,
) -> Result<DateRange, CliError> {
    let end = match end {
        Some(raw) => TradingDate::parse(raw)?,
        None => TradingDate::today(),
    };
    let start = match start {
        Some(raw) => TradingDate::parse(raw)?,
        None => TradingDate::from(end.into_inner() - time::Duration::days(365)),
    };
    Ok(DateRange::new(start, end)?)
}
