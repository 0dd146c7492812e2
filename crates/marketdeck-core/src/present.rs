//! Render-ready view models and the dashboard render pass.
//!
//! Everything here is a deterministic map over normalized inputs: empty
//! series produce empty view models, never errors. The single exception is
//! [`render`], which owns the fetch-normalize-shape pass and surfaces the
//! typed errors of its inputs.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::provider::MarketDataSource;
use crate::{
    normalize, statement, DeckError, HistoricalSeries, Interval, MetricSeries, QuoteInfo,
    QuoteSnapshot, Session, Symbol, TradingDate,
};
use crate::DateRange;

/// Close-by-date pairs for a line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub dates: Vec<TradingDate>,
    pub closes: Vec<f64>,
}

/// Per-period OHLC columns for a candlestick chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickSeries {
    pub dates: Vec<TradingDate>,
    pub opens: Vec<f64>,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub closes: Vec<f64>,
}

/// Yearly bars for one financial metric, years ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearBars {
    pub years: Vec<i32>,
    pub values: Vec<f64>,
}

pub fn to_line_series(series: &HistoricalSeries) -> LineSeries {
    LineSeries {
        dates: series.dates(),
        closes: series.closes(),
    }
}

pub fn to_candlestick(series: &HistoricalSeries) -> CandlestickSeries {
    CandlestickSeries {
        dates: series.dates(),
        opens: series.points().iter().map(|p| p.open).collect(),
        highs: series.points().iter().map(|p| p.high).collect(),
        lows: series.points().iter().map(|p| p.low).collect(),
        closes: series.closes(),
    }
}

pub fn to_bar_by_year(metric: &MetricSeries) -> YearBars {
    YearBars {
        years: metric.points.iter().map(|p| p.year).collect(),
        values: metric.points.iter().map(|p| p.value).collect(),
    }
}

/// Encode the normalized table as a CSV payload: header row, one row per
/// date, trailing newline.
pub fn to_csv(series: &HistoricalSeries) -> Vec<u8> {
    let mut out = String::from("Date,Open,High,Low,Close,Volume\n");
    for point in series.points() {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            point.date.format_iso(),
            point.open,
            point.high,
            point.low,
            point.close,
            point.volume
        ));
    }
    out.into_bytes()
}

/// Suggested download file name for an exported series.
pub fn csv_file_name(symbol: &Symbol) -> String {
    format!("{symbol}.csv")
}

/// One labeled quote figure; `None` renders as "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub label: String,
    pub value: Option<f64>,
}

/// Quote cards for the dashboard header. Missing provider fields degrade to
/// `None` per-card instead of failing the view.
pub fn quote_cards(info: &QuoteInfo) -> Vec<MetricCard> {
    let fields = [
        ("Open", info.open),
        ("Previous Close", info.previous_close),
        ("Day Low", info.day_low),
        ("Day High", info.day_high),
        ("Profit Margins", info.profit_margins),
    ];

    fields
        .into_iter()
        .map(|(label, value)| {
            if value.is_none() {
                warn!(symbol = %info.symbol, label, "quote field missing; card renders N/A");
            }
            MetricCard {
                label: label.to_owned(),
                value,
            }
        })
        .collect()
}

/// One watchlist table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistRow {
    pub symbol: Symbol,
    pub short_name: Option<String>,
    pub open: Option<f64>,
    pub percent_change: Option<f64>,
}

/// Live snapshot rows for the session watchlist, fetched at render time.
///
/// A failed fetch degrades that entry to an all-N/A row so one delisted
/// symbol does not blank the whole table.
pub async fn watchlist_rows(
    session: &Session,
    source: &dyn MarketDataSource,
) -> Vec<WatchlistRow> {
    let mut rows = Vec::with_capacity(session.watchlist.len());
    for symbol in session.watchlist.list() {
        let row = match source.quote(symbol).await {
            Ok(info) => {
                let snapshot = QuoteSnapshot::from_info_lossy(&info);
                WatchlistRow {
                    symbol: symbol.clone(),
                    short_name: snapshot.short_name,
                    open: snapshot.open,
                    percent_change: snapshot.percent_change,
                }
            }
            Err(error) => {
                warn!(symbol = %symbol, %error, "watchlist snapshot failed; rendering N/A row");
                WatchlistRow {
                    symbol: symbol.clone(),
                    short_name: None,
                    open: None,
                    percent_change: None,
                }
            }
        };
        rows.push(row);
    }
    rows
}

/// Chart style selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Candlestick,
}

/// The selected chart's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSeries {
    Line(LineSeries),
    Candlestick(CandlestickSeries),
}

/// Current input state of the dashboard: everything the user controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardInput {
    pub symbol: Symbol,
    pub range: DateRange,
    pub interval: Interval,
    pub chart: ChartKind,
    /// Formatted metric label for the yearly bar chart, if one is selected.
    pub metric: Option<String>,
}

/// The complete view model for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub symbol: Symbol,
    pub snapshot: QuoteSnapshot,
    pub cards: Vec<MetricCard>,
    pub table: HistoricalSeries,
    pub chart: ChartSeries,
    pub metric_labels: Vec<String>,
    pub metric_bars: Option<YearBars>,
    pub watchlist: Vec<WatchlistRow>,
}

/// One synchronous top-to-bottom recomputation pass: fetch, normalize,
/// shape. The caller decides when to invoke it; nothing here schedules
/// re-runs.
///
/// # Errors
///
/// Surfaces `EmptySeries`, `MetricNotFound`, and `Fetch` errors so the
/// caller can render an explicit empty/error state. Per-field quote gaps
/// are recovered into "N/A" cards instead.
pub async fn render(
    input: &DashboardInput,
    source: &dyn MarketDataSource,
    session: &Session,
) -> Result<DashboardView, DeckError> {
    let raw = source
        .history(&input.symbol, input.range, input.interval)
        .await?;
    let table = normalize::normalize(raw)?;

    let chart = match input.chart {
        ChartKind::Line => ChartSeries::Line(to_line_series(&table)),
        ChartKind::Candlestick => ChartSeries::Candlestick(to_candlestick(&table)),
    };

    let info = source.quote(&input.symbol).await?;
    let snapshot = QuoteSnapshot::from_info_lossy(&info);
    let cards = quote_cards(&info);

    let statement = source.financials(&input.symbol).await?;
    let metric_labels = statement::metrics_index(&statement);
    let metric_bars = match &input.metric {
        Some(label) => Some(to_bar_by_year(&statement::select_metric(
            &statement, label,
        )?)),
        None => None,
    };

    let watchlist = watchlist_rows(session, source).await;

    Ok(DashboardView {
        symbol: input.symbol.clone(),
        snapshot,
        cards,
        table,
        chart,
        metric_labels,
        metric_bars,
        watchlist,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MetricSeries, PricePoint, YearValue};

    fn date(input: &str) -> TradingDate {
        TradingDate::parse(input).expect("test date")
    }

    fn symbol() -> Symbol {
        Symbol::parse("GOOGL").expect("test symbol")
    }

    fn series(points: Vec<PricePoint>) -> HistoricalSeries {
        HistoricalSeries::new(symbol(), Interval::Daily, points).expect("ordered points")
    }

    fn point(day: &str, close: f64) -> PricePoint {
        PricePoint::new(date(day), close - 0.5, close + 1.0, close - 1.0, close, 500)
            .expect("test point")
    }

    #[test]
    fn empty_series_maps_to_empty_views() {
        let empty = series(Vec::new());
        assert!(to_line_series(&empty).dates.is_empty());
        assert!(to_candlestick(&empty).opens.is_empty());
        assert_eq!(to_csv(&empty), b"Date,Open,High,Low,Close,Volume\n");
    }

    #[test]
    fn line_series_pairs_dates_with_closes() {
        let s = series(vec![point("2020-01-02", 100.0), point("2020-01-03", 101.0)]);
        let line = to_line_series(&s);
        assert_eq!(line.dates.len(), 2);
        assert_eq!(line.closes, [100.0, 101.0]);
    }

    #[test]
    fn bar_years_are_non_decreasing() {
        let metric = MetricSeries {
            metric: String::from("Total Revenue"),
            points: vec![
                YearValue {
                    year: 2019,
                    value: 161.0,
                },
                YearValue {
                    year: 2020,
                    value: 182.5,
                },
                YearValue {
                    year: 2021,
                    value: 257.6,
                },
            ],
        };
        let bars = to_bar_by_year(&metric);
        assert!(bars.years.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(bars.values.len(), bars.years.len());
    }

    #[test]
    fn csv_has_header_rows_and_trailing_newline() {
        let s = series(vec![point("2020-01-02", 100.0)]);
        let payload = String::from_utf8(to_csv(&s)).expect("valid utf8");
        assert_eq!(
            payload,
            "Date,Open,High,Low,Close,Volume\n2020-01-02,99.5,101,99,100,500\n"
        );
        assert!(payload.ends_with('\n'));
    }

    #[test]
    fn csv_file_name_uses_symbol() {
        assert_eq!(csv_file_name(&symbol()), "GOOGL.csv");
    }

    #[test]
    fn cards_degrade_missing_fields() {
        let info = QuoteInfo {
            symbol: symbol(),
            short_name: Some(String::from("Alphabet Inc.")),
            open: Some(105.0),
            previous_close: Some(100.0),
            day_low: None,
            day_high: None,
            profit_margins: None,
        };
        let cards = quote_cards(&info);
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].value, Some(105.0));
        assert_eq!(cards[4].value, None);
    }
}
