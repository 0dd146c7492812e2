use thiserror::Error;

use crate::provider::FetchError;

/// Validation and contract errors exposed by `marketdeck-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },
    #[error("symbol '{symbol}' is not in the configured symbol universe")]
    UnknownSymbol { symbol: String },

    #[error("invalid interval '{value}', expected one of 1d, 1wk, 1mo, 3mo")]
    InvalidInterval { value: String },

    #[error("invalid calendar date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },
    #[error("date range start {start} is after end {end}")]
    RangeReversed { start: String, end: String },
    #[error("date range end {end} is in the future")]
    RangeInFuture { end: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("price point high must be >= low")]
    InvalidPointRange,

    #[error("series dates must be strictly ascending: '{date}' repeats or regresses")]
    UnorderedSeries { date: String },
}

/// Operation-level error taxonomy for the dashboard data layer.
///
/// `QuoteFieldMissing` is recovered locally by the presentation layer and
/// rendered as "N/A"; the remaining variants surface to the caller, which
/// renders an empty or error state instead of continuing with partial data.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("no price data for '{symbol}' in the requested range")]
    EmptySeries { symbol: String },

    #[error("metric '{metric}' is not present in the financial statement")]
    MetricNotFound { metric: String },

    #[error("quote field '{field}' is missing for '{symbol}'")]
    QuoteFieldMissing { symbol: String, field: &'static str },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
