//! Reshaping of metric-by-period financial statements.

use std::collections::BTreeMap;

use crate::{metric_label, DeckError, FinancialStatement, MetricSeries, YearValue};

/// Available metric labels, formatted for presentation, source order kept.
pub fn metrics_index(statement: &FinancialStatement) -> Vec<String> {
    statement
        .metrics
        .iter()
        .map(|row| metric_label::format(&row.name))
        .collect()
}

/// Pivot one metric into a (year, value) series.
///
/// Lookup matches the *formatted* label, since that is what
/// [`metrics_index`] presents to the caller. Years come from truncating
/// each period end to its calendar year; when sub-annual periods collide on
/// a year, the chronologically latest period wins.
///
/// # Errors
///
/// `DeckError::MetricNotFound` when the label is not in the statement.
pub fn select_metric(
    statement: &FinancialStatement,
    label: &str,
) -> Result<MetricSeries, DeckError> {
    let row = statement
        .metrics
        .iter()
        .find(|row| metric_label::format(&row.name) == label)
        .ok_or_else(|| DeckError::MetricNotFound {
            metric: label.to_owned(),
        })?;

    let mut periods = row.periods.clone();
    periods.sort_by_key(|cell| cell.period);

    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for cell in periods {
        by_year.insert(cell.period.year(), cell.value);
    }

    Ok(MetricSeries {
        metric: label.to_owned(),
        points: by_year
            .into_iter()
            .map(|(year, value)| YearValue { year, value })
            .collect(),
    })
}
