//! Column normalization for raw provider price tables.

use serde::{Deserialize, Serialize};

use crate::{DeckError, HistoricalSeries, Interval, PricePoint, Symbol, TradingDate};

/// One raw provider row before column policy is applied.
///
/// Provider revisions disagree about the close column: some ship a separate
/// adjusted-close series alongside the plain close, some only the latter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPriceRow {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adj_close: Option<f64>,
    pub volume: u64,
}

/// Date-keyed OHLCV table as fetched, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPriceTable {
    pub symbol: Symbol,
    pub interval: Interval,
    pub rows: Vec<RawPriceRow>,
}

/// Map a raw table onto the fixed {Open, High, Low, Close, Volume} schema.
///
/// Policy: an explicit adjusted-close value, when present, wins over the
/// plain close. Rows are sorted ascending by date; duplicate dates are a
/// contract violation and fail validation. No gap-filling is performed for
/// missing trading days.
///
/// # Errors
///
/// `DeckError::EmptySeries` when the table has zero rows (unknown symbol or
/// a range with no trading days); the caller renders an empty state.
pub fn normalize(raw: RawPriceTable) -> Result<HistoricalSeries, DeckError> {
    if raw.rows.is_empty() {
        return Err(DeckError::EmptySeries {
            symbol: raw.symbol.to_string(),
        });
    }

    let mut rows = raw.rows;
    rows.sort_by_key(|row| row.date);

    let mut points = Vec::with_capacity(rows.len());
    for row in rows {
        let close = row.adj_close.unwrap_or(row.close);
        points.push(PricePoint::new(
            row.date, row.open, row.high, row.low, close, row.volume,
        )?);
    }

    HistoricalSeries::new(raw.symbol, raw.interval, points).map_err(DeckError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(input: &str) -> TradingDate {
        TradingDate::parse(input).expect("test date")
    }

    fn symbol() -> Symbol {
        Symbol::parse("GOOGL").expect("test symbol")
    }

    fn row(day: &str, close: f64, adj_close: Option<f64>) -> RawPriceRow {
        RawPriceRow {
            date: date(day),
            open: close - 0.5,
            high: close + 1.0,
            low: close - 1.0,
            close,
            adj_close,
            volume: 1_000,
        }
    }

    #[test]
    fn empty_table_is_an_empty_series_error() {
        let raw = RawPriceTable {
            symbol: symbol(),
            interval: Interval::Daily,
            rows: Vec::new(),
        };
        let err = normalize(raw).expect_err("must fail");
        assert!(matches!(err, DeckError::EmptySeries { .. }));
    }

    #[test]
    fn single_row_normalizes_with_all_columns() {
        let raw = RawPriceTable {
            symbol: symbol(),
            interval: Interval::Daily,
            rows: vec![row("2020-01-02", 100.0, None)],
        };
        let series = normalize(raw).expect("must normalize");
        assert_eq!(series.len(), 1);
        let point = &series.points()[0];
        assert_eq!(point.date, date("2020-01-02"));
        assert_eq!(point.open, 99.5);
        assert_eq!(point.high, 101.0);
        assert_eq!(point.low, 99.0);
        assert_eq!(point.close, 100.0);
        assert_eq!(point.volume, 1_000);
    }

    #[test]
    fn adjusted_close_wins_over_plain_close() {
        let raw = RawPriceTable {
            symbol: symbol(),
            interval: Interval::Daily,
            rows: vec![row("2020-01-02", 100.0, Some(97.25))],
        };
        let series = normalize(raw).expect("must normalize");
        assert_eq!(series.points()[0].close, 97.25);
    }

    #[test]
    fn rows_are_sorted_ascending_by_date() {
        let raw = RawPriceTable {
            symbol: symbol(),
            interval: Interval::Daily,
            rows: vec![
                row("2020-01-06", 102.0, None),
                row("2020-01-02", 100.0, None),
                row("2020-01-03", 101.0, None),
            ],
        };
        let series = normalize(raw).expect("must normalize");
        let dates: Vec<String> = series.dates().iter().map(|d| d.format_iso()).collect();
        assert_eq!(dates, ["2020-01-02", "2020-01-03", "2020-01-06"]);
    }

    #[test]
    fn duplicate_dates_fail_validation() {
        let raw = RawPriceTable {
            symbol: symbol(),
            interval: Interval::Daily,
            rows: vec![
                row("2020-01-02", 100.0, None),
                row("2020-01-02", 101.0, None),
            ],
        };
        let err = normalize(raw).expect_err("must fail");
        assert!(matches!(err, DeckError::Validation(_)));
    }
}
