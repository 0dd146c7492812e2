//! Canonical domain types for marketdeck.
//!
//! All models validate their invariants at construction time and carry full
//! serde support so fetched responses can round-trip through the cache.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker symbol |
//! | [`SymbolUniverse`] | Externally supplied known-symbol list |
//! | [`TradingDate`] / [`DateRange`] | Calendar date and inclusive window |
//! | [`Interval`] | Sampling interval (1d, 1wk, 1mo, 3mo) |
//! | [`PricePoint`] / [`HistoricalSeries`] | Normalized OHLCV rows |
//! | [`QuoteInfo`] / [`QuoteSnapshot`] | Live quote fields and derived card |
//! | [`FinancialStatement`] / [`MetricSeries`] | Metric-by-period table and one selected metric |

mod date;
mod interval;
mod models;
mod symbol;

pub use date::{DateRange, TradingDate};
pub use interval::Interval;
pub use models::{
    percent_change, FinancialStatement, HistoricalSeries, MetricRow, MetricSeries, PeriodValue,
    PricePoint, QuoteInfo, QuoteSnapshot, YearValue,
};
pub use symbol::{Symbol, SymbolUniverse};
