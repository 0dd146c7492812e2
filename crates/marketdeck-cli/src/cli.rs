//! CLI argument definitions for marketdeck.
//!
//! The CLI stands in for the dashboard's UI layer: each command performs
//! one synchronous fetch-normalize-shape pass and prints the resulting
//! view model.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Live quote snapshot and metric cards |
//! | `history` | Normalized historical OHLCV series |
//! | `metrics` | Financial metric labels, or one metric by year |
//! | `watch` | Session watchlist with live snapshot rows |
//! | `export` | Write the normalized series to a CSV file |
//! | `render` | Full dashboard view model in one pass |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--offline` | `false` | Deterministic fixture data, no network |
//! | `--cache-ttl-secs` | `300` | Fetch cache TTL |
//! | `--refresh` | `false` | Bypass cached reads, refresh entries |
//! | `--no-cache` | `false` | Disable the fetch cache entirely |
//! | `--universe` | none | Known-symbol list file (one per line) |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Stock dashboard data core: fetch, normalize, and shape market data.
#[derive(Debug, Parser)]
#[command(
    name = "marketdeck",
    author,
    version,
    about = "Stock dashboard data core",
    long_about = "Marketdeck fetches historical prices and financial metrics for a ticker,\n\
normalizes them into canonical series, and shapes them into render-ready\n\
view models: chart series, metric cards, watchlist rows, CSV exports.\n\
\n\
Use 'marketdeck <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Serve deterministic fixture data instead of calling the provider.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    /// Fetch cache TTL in seconds.
    #[arg(long, global = true, default_value_t = 300)]
    pub cache_ttl_secs: u64,

    /// Refetch even when a fresh cache entry exists.
    #[arg(long, global = true, default_value_t = false)]
    pub refresh: bool,

    /// Disable the fetch cache entirely.
    #[arg(long, global = true, default_value_t = false)]
    pub no_cache: bool,

    /// Path to a known-symbol list (one symbol per line). When set, input
    /// symbols must be members.
    #[arg(long, global = true)]
    pub universe: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object output.
    Json,
    /// Key/value table for terminal display.
    Table,
}

/// Chart style for the render command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartArg {
    Line,
    Candlestick,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the live quote snapshot and metric cards for a symbol.
    Quote(QuoteArgs),
    /// Fetch and normalize the historical OHLCV series.
    History(HistoryArgs),
    /// List financial metric labels, or pivot one metric by year.
    Metrics(MetricsArgs),
    /// Add symbols to the session watchlist and print snapshot rows.
    Watch(WatchArgs),
    /// Export the normalized series to a CSV file.
    Export(ExportArgs),
    /// Produce the full dashboard view model in one pass.
    Render(RenderArgs),
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Ticker symbol, e.g. GOOGL.
    pub symbol: String,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Ticker symbol, e.g. GOOGL.
    pub symbol: String,

    /// Range start (YYYY-MM-DD). Defaults to one year before the end.
    #[arg(long)]
    pub start: Option<String>,

    /// Range end (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub end: Option<String>,

    /// Sampling interval: 1d, 1wk, 1mo, 3mo (or daily/weekly/monthly/quarterly).
    #[arg(long, default_value = "1d")]
    pub interval: String,
}

#[derive(Debug, Args)]
pub struct MetricsArgs {
    /// Ticker symbol, e.g. GOOGL.
    pub symbol: String,

    /// Formatted metric label (as listed), e.g. "Total Revenue".
    #[arg(long)]
    pub metric: Option<String>,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Symbols to add to the session watchlist.
    #[arg(required = true)]
    pub symbols: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Ticker symbol, e.g. GOOGL.
    pub symbol: String,

    /// Range start (YYYY-MM-DD). Defaults to one year before the end.
    #[arg(long)]
    pub start: Option<String>,

    /// Range end (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub end: Option<String>,

    /// Sampling interval: 1d, 1wk, 1mo, 3mo.
    #[arg(long, default_value = "1d")]
    pub interval: String,

    /// Output file path. Defaults to {SYMBOL}.csv in the working directory.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Ticker symbol, e.g. GOOGL.
    pub symbol: String,

    /// Range start (YYYY-MM-DD). Defaults to one year before the end.
    #[arg(long)]
    pub start: Option<String>,

    /// Range end (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub end: Option<String>,

    /// Sampling interval: 1d, 1wk, 1mo, 3mo.
    #[arg(long, default_value = "1d")]
    pub interval: String,

    /// Chart style for the price series.
    #[arg(long, value_enum, default_value_t = ChartArg::Line)]
    pub chart: ChartArg,

    /// Formatted metric label for the yearly bar chart.
    #[arg(long)]
    pub metric: Option<String>,

    /// Symbols to seed the session watchlist with before rendering.
    #[arg(long)]
    pub watch: Vec<String>,
}
