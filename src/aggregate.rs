//! Pure reshaping of sparse observations into chart-ready forms.
//!
//! Everything here is a function of its inputs; calling an aggregator twice
//! with the same data yields the same output. Missing values stay missing
//! (`None`), they are never coerced to zero or interpolated.

use crate::models::{Country, Observation};
use std::collections::{BTreeMap, HashMap};

/// One country's values aligned to the full requested year range.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    pub country_label: String,
    /// One slot per year in range order; `None` where the country did not
    /// report, so gaps keep their position.
    pub values: Vec<Option<f64>>,
}

/// A country's most recent reported value, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestValueRow {
    pub country_label: String,
    pub value: Option<f64>,
}

/// Year labels for the inclusive range, in chart order.
pub fn year_labels(start_year: i32, end_year: i32) -> Vec<String> {
    (start_year..=end_year).map(|y| y.to_string()).collect()
}

/// Align observations on a dense per-year grid, one series per country in
/// input order.
///
/// Output length is always `end_year - start_year + 1` per country no matter
/// how sparse the input is. Duplicate (country, year) rows are not expected
/// from the source; if they occur the last one wins.
pub fn build_aligned_series(
    countries: &[Country],
    observations: &[Observation],
    start_year: i32,
    end_year: i32,
) -> Vec<AlignedSeries> {
    let mut by_country: HashMap<&str, BTreeMap<i32, Option<f64>>> = HashMap::new();
    for o in observations {
        by_country
            .entry(o.country_code.as_str())
            .or_default()
            .insert(o.year, o.value);
    }

    countries
        .iter()
        .map(|c| {
            let years = by_country.get(c.code.as_str());
            let values = (start_year..=end_year)
                .map(|y| years.and_then(|m| m.get(&y).copied()).flatten())
                .collect();
            AlignedSeries {
                country_label: c.name.clone(),
                values,
            }
        })
        .collect()
}

/// Pick each country's observation with the greatest year among those that
/// carry a value. Countries with nothing reported get `value: None`.
pub fn build_latest_value_rows(
    countries: &[Country],
    observations: &[Observation],
) -> Vec<LatestValueRow> {
    countries
        .iter()
        .map(|c| {
            let value = observations
                .iter()
                .filter(|o| o.country_code == c.code && o.value.is_some())
                .max_by_key(|o| o.year)
                .and_then(|o| o.value);
            LatestValueRow {
                country_label: c.name.clone(),
                value,
            }
        })
        .collect()
}

/// Assemble per-indicator latest-value rows into a countries x indicators
/// matrix.
///
/// `rows_per_indicator` holds one column per indicator, each aligned to
/// `countries` order (as [`build_latest_value_rows`] produces).
pub fn build_matrix(
    countries: &[Country],
    rows_per_indicator: &[Vec<LatestValueRow>],
) -> Vec<Vec<Option<f64>>> {
    (0..countries.len())
        .map(|r| {
            rows_per_indicator
                .iter()
                .map(|col| col.get(r).and_then(|row| row.value))
                .collect()
        })
        .collect()
}
