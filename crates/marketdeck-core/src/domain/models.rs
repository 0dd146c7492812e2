use serde::{Deserialize, Serialize};

use crate::{Interval, Symbol, TradingDate, ValidationError};

/// One normalized OHLCV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PricePoint {
    /// Validates prices as finite and non-negative with high >= low.
    ///
    /// Open/close are deliberately not bounds-checked against [low, high]:
    /// the close column may carry a split/dividend-adjusted value that falls
    /// outside the unadjusted intraday range.
    pub fn new(
        date: TradingDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidPointRange);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Normalized historical series: ascending unique dates, fixed columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub symbol: Symbol,
    pub interval: Interval,
    points: Vec<PricePoint>,
}

impl HistoricalSeries {
    /// Wrap points, enforcing strictly ascending dates (no duplicates).
    pub fn new(
        symbol: Symbol,
        interval: Interval,
        points: Vec<PricePoint>,
    ) -> Result<Self, ValidationError> {
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(ValidationError::UnorderedSeries {
                    date: pair[1].date.format_iso(),
                });
            }
        }

        Ok(Self {
            symbol,
            interval,
            points,
        })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<TradingDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }
}

/// Raw live quote fields as reported by the provider.
///
/// Every field is optional at this layer; presence is a per-symbol,
/// per-provider matter (delisted symbols drop most of them).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteInfo {
    pub symbol: Symbol,
    pub short_name: Option<String>,
    pub open: Option<f64>,
    pub previous_close: Option<f64>,
    pub day_low: Option<f64>,
    pub day_high: Option<f64>,
    pub profit_margins: Option<f64>,
}

/// Watchlist quote card: name, open, and percent change since previous close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub short_name: Option<String>,
    pub open: Option<f64>,
    pub previous_close: Option<f64>,
    /// `None` when either input is missing or previous close is zero;
    /// rendered as "N/A" rather than dividing by zero.
    pub percent_change: Option<f64>,
}

impl QuoteSnapshot {
    /// Lossy derivation: missing fields become `None` and are rendered as
    /// "N/A" downstream, so one broken entry never blanks a whole view.
    pub fn from_info_lossy(info: &QuoteInfo) -> Self {
        Self {
            short_name: info.short_name.clone(),
            open: info.open,
            previous_close: info.previous_close,
            percent_change: percent_change(info.open, info.previous_close),
        }
    }

    /// Strict derivation: any missing core field is an error the caller must
    /// handle explicitly.
    pub fn try_from_info(info: &QuoteInfo) -> Result<Self, crate::DeckError> {
        let require = |field: &'static str, value: Option<f64>| {
            value.ok_or_else(|| crate::DeckError::QuoteFieldMissing {
                symbol: info.symbol.to_string(),
                field,
            })
        };

        let short_name = info.short_name.clone().ok_or_else(|| {
            crate::DeckError::QuoteFieldMissing {
                symbol: info.symbol.to_string(),
                field: "shortName",
            }
        })?;
        let open = require("open", info.open)?;
        let previous_close = require("previousClose", info.previous_close)?;

        Ok(Self {
            short_name: Some(short_name),
            open: Some(open),
            previous_close: Some(previous_close),
            percent_change: percent_change(Some(open), Some(previous_close)),
        })
    }
}

/// Percent change since previous close, rounded to 2 decimals.
/// Zero previous close reports unavailable instead of dividing.
pub fn percent_change(open: Option<f64>, previous_close: Option<f64>) -> Option<f64> {
    match (open, previous_close) {
        (Some(open), Some(prev)) if prev != 0.0 => {
            Some(round2((open - prev) / prev * 100.0))
        }
        _ => None,
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One metric row of a financial statement: raw identifier plus its
/// reporting-period values, as fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    pub name: String,
    pub periods: Vec<PeriodValue>,
}

/// A single (period end, value) cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodValue {
    pub period: TradingDate,
    pub value: f64,
}

/// Metric-by-period financial statement for one symbol, row order preserved
/// from the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatement {
    pub symbol: Symbol,
    pub metrics: Vec<MetricRow>,
}

/// Annual series for one selected metric, years ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    /// Human-readable (formatted) metric label.
    pub metric: String,
    pub points: Vec<YearValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeckError;

    fn date(input: &str) -> TradingDate {
        TradingDate::parse(input).expect("test date")
    }

    fn symbol() -> Symbol {
        Symbol::parse("GOOGL").expect("test symbol")
    }

    #[test]
    fn rejects_inverted_price_range() {
        let err = PricePoint::new(date("2020-01-02"), 10.0, 9.0, 12.0, 10.5, 100)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidPointRange));
    }

    #[test]
    fn rejects_negative_price() {
        let err = PricePoint::new(date("2020-01-02"), -1.0, 9.0, 8.0, 8.5, 100)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::NegativeValue { field: "open" }));
    }

    #[test]
    fn allows_adjusted_close_outside_day_range() {
        let point = PricePoint::new(date("2020-01-02"), 10.0, 12.0, 9.0, 5.5, 100)
            .expect("adjusted close below low is legal");
        assert_eq!(point.close, 5.5);
    }

    #[test]
    fn rejects_duplicate_series_dates() {
        let points = vec![
            PricePoint::new(date("2020-01-02"), 10.0, 12.0, 9.0, 11.0, 100).expect("point"),
            PricePoint::new(date("2020-01-02"), 11.0, 13.0, 10.0, 12.0, 100).expect("point"),
        ];
        let err = HistoricalSeries::new(symbol(), Interval::Daily, points)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::UnorderedSeries { .. }));
    }

    #[test]
    fn percent_change_basic() {
        assert_eq!(percent_change(Some(105.0), Some(100.0)), Some(5.0));
    }

    #[test]
    fn percent_change_zero_previous_close_is_unavailable() {
        assert_eq!(percent_change(Some(105.0), Some(0.0)), None);
    }

    #[test]
    fn percent_change_rounds_to_two_decimals() {
        // (100.456 - 100) / 100 * 100 = 0.456 -> 0.46
        assert_eq!(percent_change(Some(100.456), Some(100.0)), Some(0.46));
    }

    #[test]
    fn strict_snapshot_reports_missing_field() {
        let info = QuoteInfo {
            symbol: symbol(),
            short_name: Some(String::from("Alphabet Inc.")),
            open: Some(105.0),
            previous_close: None,
            day_low: None,
            day_high: None,
            profit_margins: None,
        };
        let err = QuoteSnapshot::try_from_info(&info).expect_err("must fail");
        assert!(matches!(
            err,
            DeckError::QuoteFieldMissing {
                field: "previousClose",
                ..
            }
        ));
    }

    #[test]
    fn lossy_snapshot_degrades_missing_fields() {
        let info = QuoteInfo {
            symbol: symbol(),
            short_name: None,
            open: Some(105.0),
            previous_close: Some(100.0),
            day_low: None,
            day_high: None,
            profit_margins: None,
        };
        let snapshot = QuoteSnapshot::from_info_lossy(&info);
        assert_eq!(snapshot.short_name, None);
        assert_eq!(snapshot.percent_change, Some(5.0));
    }
}
