//! Session-scoped state: the country catalog and the user's current choices.
//!
//! The interface layer owns a [`SelectionState`] and passes it by reference
//! into [`crate::resolve`] and [`crate::dispatch`]; the engine never reads
//! ambient globals.

use crate::models::{Country, YearRange};
use crate::registry::Dimension;

/// Reference list of selectable countries, sorted by display name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    countries: Vec<Country>,
}

impl Catalog {
    pub fn new(mut countries: Vec<Country>) -> Self {
        countries.sort_by(|a, b| a.name.cmp(&b.name));
        Self { countries }
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Case-insensitive substring match on the display name. A blank filter
    /// returns everything.
    pub fn search(&self, filter: &str) -> Vec<&Country> {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return self.countries.iter().collect();
        }
        self.countries
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

/// The user's current axis and input choices.
///
/// Country selection keeps insertion order for display and is deduplicated
/// by code; mutation happens only through the toggle below, between generate
/// runs.
#[derive(Debug, Clone)]
pub struct SelectionState {
    pub x_axis: Dimension,
    pub y_axis: Dimension,
    pub year_range: Option<YearRange>,
    selected: Vec<Country>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            x_axis: Dimension::Time,
            y_axis: Dimension::GdpGrowth,
            year_range: None,
            selected: Vec::new(),
        }
    }
}

impl SelectionState {
    /// Fresh state with the given axes and nothing selected.
    pub fn new(x_axis: Dimension, y_axis: Dimension) -> Self {
        Self {
            x_axis,
            y_axis,
            ..Self::default()
        }
    }

    /// Add the country if absent, remove it if present. Returns whether the
    /// country is selected after the call.
    pub fn toggle_country(&mut self, country: Country) -> bool {
        if let Some(idx) = self.selected.iter().position(|c| c.code == country.code) {
            self.selected.remove(idx);
            false
        } else {
            self.selected.push(country);
            true
        }
    }

    pub fn selected_countries(&self) -> &[Country] {
        &self.selected
    }

    pub fn is_selected(&self, code: &str) -> bool {
        self.selected.iter().any(|c| c.code == code)
    }

    pub fn clear_countries(&mut self) {
        self.selected.clear();
    }
}
