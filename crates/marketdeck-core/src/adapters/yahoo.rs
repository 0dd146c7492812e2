//! Yahoo Finance adapter.
//!
//! Real mode talks to the v8 chart endpoint for history, the v10
//! quoteSummary endpoint for live quote info, and the fundamentals
//! timeseries endpoint for financial statements. A non-real transport
//! switches the adapter to deterministic fixture data so every code path
//! works offline.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use time::OffsetDateTime;
use tracing::debug;

use crate::http_client::{HttpClient, HttpRequest, NoopHttpClient};
use crate::normalize::{RawPriceRow, RawPriceTable};
use crate::provider::{FetchError, MarketDataSource};
use crate::{
    DateRange, FinancialStatement, Interval, MetricRow, PeriodValue, QuoteInfo, Symbol,
    TradingDate,
};

const QUOTE_SUMMARY_MODULES: &str = "price,summaryDetail,financialData";

/// Annual statement rows requested from the timeseries endpoint.
const ANNUAL_METRIC_TYPES: [&str; 6] = [
    "annualTotalRevenue",
    "annualCostOfRevenue",
    "annualGrossProfit",
    "annualOperatingIncome",
    "annualNetIncome",
    "annualEBITDA",
];

/// Yahoo adapter supporting both real API calls and fixture mode.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    use_real_api: bool,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            use_real_api: false,
        }
    }
}

impl YahooAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        let use_real_api = !http_client.is_mock();
        Self {
            http_client,
            use_real_api,
        }
    }

    fn is_real_client(&self) -> bool {
        self.use_real_api
    }

    async fn execute_get(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "yahoo fetch");
        let request = HttpRequest::get(url)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(10_000);

        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.retryable() {
                FetchError::unavailable(format!("yahoo transport error: {}", error.message()))
            } else {
                FetchError::internal(format!("yahoo transport error: {}", error.message()))
            }
        })?;

        if response.status == 429 {
            return Err(FetchError::rate_limited("yahoo returned status 429"));
        }
        if !response.is_success() {
            return Err(FetchError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        Ok(response.body)
    }
}

impl MarketDataSource for YahooAdapter {
    fn quote<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteInfo, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            if self.is_real_client() {
                let url = format!(
                    "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules={}",
                    urlencoding::encode(symbol.as_str()),
                    QUOTE_SUMMARY_MODULES
                );
                let body = self.execute_get(&url).await?;
                parse_quote_summary(symbol, &body)
            } else {
                Ok(fixture_quote(symbol))
            }
        })
    }

    fn history<'a>(
        &'a self,
        symbol: &'a Symbol,
        range: DateRange,
        interval: Interval,
    ) -> Pin<Box<dyn Future<Output = Result<RawPriceTable, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            if self.is_real_client() {
                // period2 is exclusive upstream; push it one day past the
                // inclusive range end.
                let period2 = range
                    .end
                    .succ()
                    .map_or_else(|| range.end.unix_midnight(), TradingDate::unix_midnight);
                let url = format!(
                    "https://query1.finance.yahoo.com/v8/finance/chart/{}?period1={}&period2={}&interval={}&events=div%2Csplits",
                    urlencoding::encode(symbol.as_str()),
                    range.start.unix_midnight(),
                    period2,
                    interval
                );
                let body = self.execute_get(&url).await?;
                parse_chart(symbol, interval, &body)
            } else {
                Ok(fixture_history(symbol, range, interval))
            }
        })
    }

    fn financials<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<FinancialStatement, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            if self.is_real_client() {
                let now = OffsetDateTime::now_utc().unix_timestamp();
                let five_years = 5 * 366 * 86_400;
                let url = format!(
                    "https://query1.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries/{}?type={}&period1={}&period2={}",
                    urlencoding::encode(symbol.as_str()),
                    ANNUAL_METRIC_TYPES.join("%2C"),
                    now - five_years,
                    now
                );
                let body = self.execute_get(&url).await?;
                parse_timeseries(symbol, &body)
            } else {
                Ok(fixture_financials(symbol))
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Wire parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
    #[serde(default)]
    adjclose: Vec<AdjCloseBlock>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseBlock {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

fn parse_chart(
    symbol: &Symbol,
    interval: Interval,
    body: &str,
) -> Result<RawPriceTable, FetchError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::internal(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = &response.chart.error {
        if !error.is_null() {
            return Err(FetchError::unavailable(format!(
                "yahoo chart error: {error}"
            )));
        }
    }

    let mut rows = Vec::new();
    let results = response.chart.result.unwrap_or_default();
    if let Some(result) = results.first() {
        let quote = result.indicators.quote.first();
        let adjclose = result.indicators.adjclose.first();

        for (index, ts) in result.timestamp.iter().enumerate() {
            let Some(quote) = quote else { break };
            let fields = (
                quote.open.get(index).copied().flatten(),
                quote.high.get(index).copied().flatten(),
                quote.low.get(index).copied().flatten(),
                quote.close.get(index).copied().flatten(),
            );
            let (Some(open), Some(high), Some(low), Some(close)) = fields else {
                // Null price cells happen on halted days; skip the row.
                debug!(symbol = %symbol, index, "skipping incomplete chart row");
                continue;
            };

            let date = TradingDate::from_unix_timestamp(*ts)
                .map_err(|e| FetchError::internal(format!("bad chart timestamp: {e}")))?;

            rows.push(RawPriceRow {
                date,
                open,
                high,
                low,
                close,
                adj_close: adjclose.and_then(|block| block.adjclose.get(index).copied().flatten()),
                volume: quote.volume.get(index).copied().flatten().unwrap_or(0),
            });
        }
    }

    Ok(RawPriceTable {
        symbol: symbol.clone(),
        interval,
        rows,
    })
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryBody {
    result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResult {
    price: Option<PriceModule>,
    #[serde(rename = "summaryDetail")]
    summary_detail: Option<SummaryDetailModule>,
    #[serde(rename = "financialData")]
    financial_data: Option<FinancialDataModule>,
}

#[derive(Debug, Deserialize)]
struct PriceModule {
    #[serde(rename = "shortName")]
    short_name: Option<String>,
    #[serde(rename = "regularMarketOpen")]
    open: Option<WrappedNumber>,
    #[serde(rename = "regularMarketPreviousClose")]
    previous_close: Option<WrappedNumber>,
    #[serde(rename = "regularMarketDayLow")]
    day_low: Option<WrappedNumber>,
    #[serde(rename = "regularMarketDayHigh")]
    day_high: Option<WrappedNumber>,
}

#[derive(Debug, Deserialize)]
struct SummaryDetailModule {
    #[serde(rename = "previousClose")]
    previous_close: Option<WrappedNumber>,
}

#[derive(Debug, Deserialize)]
struct FinancialDataModule {
    #[serde(rename = "profitMargins")]
    profit_margins: Option<WrappedNumber>,
}

/// Yahoo wraps numerics as `{"raw": 123.4, "fmt": "123.40"}`.
#[derive(Debug, Deserialize)]
struct WrappedNumber {
    raw: Option<f64>,
}

fn unwrap_number(value: &Option<WrappedNumber>) -> Option<f64> {
    value.as_ref().and_then(|wrapped| wrapped.raw)
}

fn parse_quote_summary(symbol: &Symbol, body: &str) -> Result<QuoteInfo, FetchError> {
    let response: QuoteSummaryResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::internal(format!("failed to parse yahoo quote summary: {e}")))?;

    if let Some(error) = &response.quote_summary.error {
        if !error.is_null() {
            return Err(FetchError::unavailable(format!(
                "yahoo quote summary error: {error}"
            )));
        }
    }

    let result = response
        .quote_summary
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| {
            FetchError::unavailable(format!("yahoo returned no quote data for '{symbol}'"))
        })?;

    let price = result.price.as_ref();
    let previous_close = price
        .and_then(|module| unwrap_number(&module.previous_close))
        .or_else(|| {
            result
                .summary_detail
                .as_ref()
                .and_then(|module| unwrap_number(&module.previous_close))
        });

    Ok(QuoteInfo {
        symbol: symbol.clone(),
        short_name: price.and_then(|module| module.short_name.clone()),
        open: price.and_then(|module| unwrap_number(&module.open)),
        previous_close,
        day_low: price.and_then(|module| unwrap_number(&module.day_low)),
        day_high: price.and_then(|module| unwrap_number(&module.day_high)),
        profit_margins: result
            .financial_data
            .as_ref()
            .and_then(|module| unwrap_number(&module.profit_margins)),
    })
}

#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    timeseries: TimeseriesBody,
}

#[derive(Debug, Deserialize)]
struct TimeseriesBody {
    result: Option<Vec<TimeseriesResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesResult {
    meta: TimeseriesMeta,
    #[serde(flatten)]
    series: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesMeta {
    #[serde(rename = "type", default)]
    types: Vec<String>,
}

fn parse_timeseries(symbol: &Symbol, body: &str) -> Result<FinancialStatement, FetchError> {
    let response: TimeseriesResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::internal(format!("failed to parse yahoo timeseries: {e}")))?;

    if let Some(error) = &response.timeseries.error {
        if !error.is_null() {
            return Err(FetchError::unavailable(format!(
                "yahoo timeseries error: {error}"
            )));
        }
    }

    let mut metrics = Vec::new();
    for result in response.timeseries.result.unwrap_or_default() {
        let Some(type_name) = result.meta.types.first() else {
            continue;
        };
        let Some(entries) = result.series.get(type_name).and_then(|v| v.as_array()) else {
            continue;
        };

        let mut periods = Vec::new();
        for entry in entries {
            // Missing periods come through as nulls.
            let Some(as_of) = entry.get("asOfDate").and_then(|v| v.as_str()) else {
                continue;
            };
            let Some(value) = entry
                .get("reportedValue")
                .and_then(|v| v.get("raw"))
                .and_then(|v| v.as_f64())
            else {
                continue;
            };
            let Ok(period) = TradingDate::parse(as_of) else {
                continue;
            };
            periods.push(PeriodValue { period, value });
        }

        if !periods.is_empty() {
            metrics.push(MetricRow {
                name: metric_identifier(type_name),
                periods,
            });
        }
    }

    Ok(FinancialStatement {
        symbol: symbol.clone(),
        metrics,
    })
}

/// Strip the reporting-frequency prefix from a timeseries type, leaving the
/// PascalCase metric identifier ("annualTotalRevenue" -> "TotalRevenue").
fn metric_identifier(type_name: &str) -> String {
    for prefix in ["annual", "quarterly", "trailing"] {
        if let Some(stripped) = type_name.strip_prefix(prefix) {
            if !stripped.is_empty() {
                return stripped.to_owned();
            }
        }
    }
    type_name.to_owned()
}

// ---------------------------------------------------------------------------
// Fixture data
// ---------------------------------------------------------------------------

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().map(u64::from).sum()
}

fn fixture_name(symbol: &Symbol) -> String {
    let raw = symbol.as_str();
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => format!("{}{} Inc.", first, chars.as_str().to_ascii_lowercase()),
        None => String::from("Unknown Inc."),
    }
}

fn fixture_quote(symbol: &Symbol) -> QuoteInfo {
    let base = 80.0 + (symbol_seed(symbol) % 240) as f64 / 2.0;
    QuoteInfo {
        symbol: symbol.clone(),
        short_name: Some(fixture_name(symbol)),
        open: Some(round2(base * 1.02)),
        previous_close: Some(round2(base)),
        day_low: Some(round2(base * 0.99)),
        day_high: Some(round2(base * 1.03)),
        profit_margins: Some(0.21),
    }
}

fn fixture_history(symbol: &Symbol, range: DateRange, interval: Interval) -> RawPriceTable {
    let seed = symbol_seed(symbol);
    let base = 80.0 + (seed % 240) as f64 / 2.0;

    let mut rows = Vec::new();
    let mut cursor = Some(range.start);
    let mut index = 0u64;

    while let Some(date) = cursor {
        if date > range.end {
            break;
        }

        let include = match interval {
            Interval::Daily => !date.is_weekend(),
            _ => true,
        };
        if include {
            let drift = ((seed + index) % 17) as f64 * 0.3;
            let open = round2(base + drift);
            let close = round2(open + 0.45);
            rows.push(RawPriceRow {
                date,
                open,
                high: round2(close + 1.10),
                low: round2(open - 0.90),
                close,
                adj_close: Some(round2(close * 0.97)),
                volume: 1_200_000 + index * 7_500,
            });
            index += 1;
        }

        cursor = advance(date, interval);
    }

    RawPriceTable {
        symbol: symbol.clone(),
        interval,
        rows,
    }
}

fn advance(date: TradingDate, interval: Interval) -> Option<TradingDate> {
    let mut next = date;
    for _ in 0..interval.approx_days() {
        next = next.succ()?;
    }
    Some(next)
}

fn fixture_financials(symbol: &Symbol) -> FinancialStatement {
    let seed = symbol_seed(symbol);
    let revenue_base = (seed % 900 + 100) as f64;
    let factors: [(&str, f64); 5] = [
        ("TotalRevenue", 1.0),
        ("CostOfRevenue", 0.55),
        ("GrossProfit", 0.45),
        ("OperatingIncome", 0.28),
        ("NetIncome", 0.21),
    ];

    let metrics = factors
        .iter()
        .map(|(name, factor)| MetricRow {
            name: (*name).to_owned(),
            periods: (0..4)
                .map(|offset| {
                    let year = 2019 + offset;
                    let growth = 1.0 + 0.08 * offset as f64;
                    PeriodValue {
                        period: TradingDate::parse(&format!("{year}-12-31"))
                            .expect("fixture period is a valid date"),
                        value: round2(revenue_base * factor * growth),
                    }
                })
                .collect(),
        })
        .collect();

    FinancialStatement {
        symbol: symbol.clone(),
        metrics,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
