//! Behavior-driven tests for the dashboard render pass.
//!
//! These tests verify HOW user-visible scenarios flow through the fixture
//! adapter: fetch, normalize, shape, render.

use marketdeck_core::{
    metric_label, normalize, present, statement, ChartKind, ChartSeries, DashboardInput,
    DateRange, Interval, MarketDataSource, QuoteSnapshot, Session, Symbol, TradingDate,
    YahooAdapter,
};

fn symbol(input: &str) -> Symbol {
    Symbol::parse(input).expect("test symbol")
}

fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(
        TradingDate::parse(start).expect("test date"),
        TradingDate::parse(end).expect("test date"),
    )
    .expect("test range")
}

// =============================================================================
// Historical series: normalization end to end
// =============================================================================

#[tokio::test]
async fn when_a_daily_range_is_fetched_rows_cover_trading_days_in_order() {
    // Given: a daily request for GOOGL over the first ten days of 2020
    let adapter = YahooAdapter::default();
    let sym = symbol("GOOGL");

    // When: the raw table is fetched and normalized
    let raw = adapter
        .history(&sym, range("2020-01-01", "2020-01-10"), Interval::Daily)
        .await
        .expect("fixture fetch succeeds");
    let series = normalize::normalize(raw).expect("fixture data normalizes");

    // Then: one row per trading day, ascending, no weekend rows
    assert_eq!(series.len(), 8, "Jan 4/5 2020 are a weekend");
    let dates = series.dates();
    assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(dates.iter().all(|d| !d.is_weekend()));
}

#[tokio::test]
async fn when_an_adjusted_close_is_present_it_becomes_the_close_column() {
    // Given: the fixture provider ships both close and adjusted close
    let adapter = YahooAdapter::default();
    let sym = symbol("GOOGL");
    let raw = adapter
        .history(&sym, range("2020-01-06", "2020-01-10"), Interval::Daily)
        .await
        .expect("fixture fetch succeeds");
    let adjusted: Vec<f64> = raw
        .rows
        .iter()
        .map(|row| row.adj_close.expect("fixture always adjusts"))
        .collect();

    // When: the table is normalized
    let series = normalize::normalize(raw).expect("fixture data normalizes");

    // Then: the close column carries the adjusted values
    assert_eq!(series.closes(), adjusted);
}

// =============================================================================
// Quote snapshot
// =============================================================================

#[tokio::test]
async fn when_a_quote_is_fetched_percent_change_is_derived() {
    // Given: the fixture opens 2% above the previous close
    let adapter = YahooAdapter::default();
    let info = adapter
        .quote(&symbol("GOOGL"))
        .await
        .expect("fixture quote succeeds");

    // When: the snapshot is derived
    let snapshot = QuoteSnapshot::from_info_lossy(&info);

    // Then: percent change is rounded to two decimals
    assert_eq!(snapshot.percent_change, Some(2.0));
    assert!(snapshot.short_name.is_some());
}

// =============================================================================
// Financial statement reshaping
// =============================================================================

#[tokio::test]
async fn when_a_statement_is_fetched_labels_are_formatted_in_source_order() {
    let adapter = YahooAdapter::default();
    let st = adapter
        .financials(&symbol("GOOGL"))
        .await
        .expect("fixture statement succeeds");

    let labels = statement::metrics_index(&st);
    assert_eq!(
        labels,
        [
            "Total Revenue",
            "Cost Of Revenue",
            "Gross Profit",
            "Operating Income",
            "Net Income"
        ]
    );

    // Each label is a fixed point of the formatter.
    for label in &labels {
        assert_eq!(&metric_label::format(label), label);
    }
}

#[tokio::test]
async fn when_a_metric_is_selected_years_are_ascending() {
    let adapter = YahooAdapter::default();
    let st = adapter
        .financials(&symbol("GOOGL"))
        .await
        .expect("fixture statement succeeds");

    let series = statement::select_metric(&st, "Gross Profit").expect("fixture carries the metric");
    let bars = present::to_bar_by_year(&series);

    assert_eq!(bars.years, [2019, 2020, 2021, 2022]);
    assert!(bars.values.iter().all(|v| *v > 0.0));
}

// =============================================================================
// Render pass
// =============================================================================

#[tokio::test]
async fn when_the_dashboard_renders_the_view_model_is_complete() {
    // Given: a session watching MSFT and a candlestick chart selection
    let adapter = YahooAdapter::default();
    let mut session = Session::new();
    session.watchlist.add(symbol("MSFT"));

    let input = DashboardInput {
        symbol: symbol("GOOGL"),
        range: range("2020-01-01", "2020-01-31"),
        interval: Interval::Daily,
        chart: ChartKind::Candlestick,
        metric: Some(String::from("Total Revenue")),
    };

    // When: one render pass runs
    let view = present::render(&input, &adapter, &session)
        .await
        .expect("render succeeds over fixture data");

    // Then: every section of the view model is populated and consistent
    assert_eq!(view.symbol.as_str(), "GOOGL");
    assert!(!view.table.is_empty());
    match &view.chart {
        ChartSeries::Candlestick(candles) => {
            assert_eq!(candles.dates.len(), view.table.len());
            assert_eq!(candles.opens.len(), candles.closes.len());
        }
        ChartSeries::Line(_) => panic!("candlestick was selected"),
    }
    assert_eq!(view.cards.len(), 5);
    let bars = view.metric_bars.expect("a metric was selected");
    assert!(bars.years.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(view.watchlist.len(), 1);
    assert_eq!(view.watchlist[0].symbol.as_str(), "MSFT");
}

#[tokio::test]
async fn when_no_metric_is_selected_render_still_lists_labels() {
    let adapter = YahooAdapter::default();
    let session = Session::new();

    let input = DashboardInput {
        symbol: symbol("GOOGL"),
        range: range("2020-01-01", "2020-01-10"),
        interval: Interval::Daily,
        chart: ChartKind::Line,
        metric: None,
    };

    let view = present::render(&input, &adapter, &session)
        .await
        .expect("render succeeds over fixture data");

    assert!(view.metric_bars.is_none());
    assert_eq!(view.metric_labels.len(), 5);
    match &view.chart {
        ChartSeries::Line(line) => assert_eq!(line.dates.len(), view.table.len()),
        ChartSeries::Candlestick(_) => panic!("line was selected"),
    }
}

// =============================================================================
// CSV export payload
// =============================================================================

#[tokio::test]
async fn when_the_series_is_exported_the_payload_is_a_full_csv_table() {
    let adapter = YahooAdapter::default();
    let sym = symbol("GOOGL");
    let raw = adapter
        .history(&sym, range("2020-01-01", "2020-01-10"), Interval::Daily)
        .await
        .expect("fixture fetch succeeds");
    let series = normalize::normalize(raw).expect("fixture data normalizes");

    let payload = String::from_utf8(present::to_csv(&series)).expect("csv is utf8");
    let lines: Vec<&str> = payload.lines().collect();

    assert_eq!(lines[0], "Date,Open,High,Low,Close,Volume");
    assert_eq!(lines.len(), series.len() + 1);
    assert!(payload.ends_with('\n'));
    assert_eq!(present::csv_file_name(&sym), "GOOGL.csv");

    // Each data row starts with its ISO date.
    for (line, date) in lines[1..].iter().zip(series.dates()) {
        assert!(line.starts_with(&date.format_iso()));
    }
}
