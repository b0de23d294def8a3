//! Pre-fetch validation of the current selections.
//!
//! Every rule here runs before any network call; a failed resolve means no
//! fetch is ever attempted for that generate run.

use crate::error::WbxError;
use crate::models::{Country, YearRange, default_year_range};
use crate::registry::Dimension;
use crate::session::SelectionState;
use std::collections::BTreeSet;

/// Validated inputs for one generate run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParams {
    pub start_year: i32,
    pub end_year: i32,
    /// Deduplicated by code, selection order preserved.
    pub countries: Vec<Country>,
}

/// Turn the session state into a validated parameter bundle.
///
/// - Missing year range defaults to 1990 through last year.
/// - `start > end` fails with [`WbxError::InvalidRange`].
/// - A country selection is required whenever either axis is the country
///   meta-dimension or is bound to an indicator; otherwise an empty selection
///   is fine (the pair will fail later for having nothing to fetch).
pub fn resolve(state: &SelectionState) -> Result<ResolvedParams, WbxError> {
    let YearRange { start, end } = state.year_range.unwrap_or_else(default_year_range);
    if start > end {
        return Err(WbxError::InvalidRange { start, end });
    }

    let (x, y) = (state.x_axis, state.y_axis);
    let needs_countries = x == Dimension::Country
        || y == Dimension::Country
        || x.indicator_code().is_some()
        || y.indicator_code().is_some();

    let mut seen = BTreeSet::new();
    let countries: Vec<Country> = state
        .selected_countries()
        .iter()
        .filter(|c| seen.insert(c.code.clone()))
        .cloned()
        .collect();

    if needs_countries && countries.is_empty() {
        return Err(WbxError::NoCountrySelected);
    }

    Ok(ResolvedParams {
        start_year: start,
        end_year: end,
        countries,
    })
}
