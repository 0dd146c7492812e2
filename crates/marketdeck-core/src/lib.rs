//! # Marketdeck Core
//!
//! Data normalization and presentation shaping for a stock-market
//! dashboard. The crate owns everything between a market-data provider and
//! a UI layer: canonical domain types, column normalization for historical
//! price series, financial-statement reshaping, a session-scoped watchlist,
//! and the render pass that turns all of it into view models.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo) |
//! | [`cache`] | Keyed TTL cache for fetched responses |
//! | [`cached_source`] | Caching decorator over a data source |
//! | [`domain`] | Domain models (Symbol, PricePoint, QuoteInfo, ...) |
//! | [`error`] | Validation and operation error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`metric_label`] | camelCase metric identifier formatting |
//! | [`normalize`] | Raw price table to normalized series |
//! | [`present`] | View models, CSV payloads, and the render pass |
//! | [`provider`] | Data source trait and fetch errors |
//! | [`session`] | Explicit per-session context |
//! | [`statement`] | Financial statement reshaping |
//! | [`watchlist`] | Insertion-ordered symbol set |
//!
//! ## Control Flow
//!
//! ```text
//! user input (symbol, range, interval, chart)
//!        │
//!        ▼
//! MarketDataSource ──▶ CachedSource ──▶ YahooAdapter ──▶ HttpClient
//!        │
//!        ▼
//! normalize / statement ──▶ present::render ──▶ DashboardView
//! ```
//!
//! ## Errors
//!
//! Fetch failures surface as [`FetchError`]; operation failures as
//! [`DeckError`]. Missing quote fields are the one locally recovered case:
//! they degrade to "N/A" values so a single broken entry never blanks a
//! view.

pub mod adapters;
pub mod cache;
pub mod cached_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod metric_label;
pub mod normalize;
pub mod present;
pub mod provider;
pub mod session;
pub mod statement;
pub mod watchlist;

pub use adapters::YahooAdapter;
pub use cache::{financials_key, history_key, quote_key, CacheMode, FetchCache};
pub use cached_source::CachedSource;
pub use domain::{
    percent_change, DateRange, FinancialStatement, HistoricalSeries, Interval, MetricRow,
    MetricSeries, PeriodValue, PricePoint, QuoteInfo, QuoteSnapshot, Symbol, SymbolUniverse,
    TradingDate, YearValue,
};
pub use error::{DeckError, ValidationError};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};
pub use normalize::{normalize, RawPriceRow, RawPriceTable};
pub use present::{
    csv_file_name, quote_cards, render, to_bar_by_year, to_candlestick, to_csv, to_line_series,
    watchlist_rows, CandlestickSeries, ChartKind, ChartSeries, DashboardInput, DashboardView,
    LineSeries, MetricCard, WatchlistRow, YearBars,
};
pub use provider::{FetchError, FetchErrorKind, MarketDataSource};
pub use session::Session;
pub use statement::{metrics_index, select_metric};
pub use watchlist::Watchlist;
