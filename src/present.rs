//! Shapes handed across the presentation boundary.
//!
//! A generate run emits exactly one of these; consumers (the bundled
//! renderers in [`crate::viz`] and [`crate::export`], or an embedding
//! application) draw them without touching raw observations.

use serde::{Deserialize, Serialize};

/// Which axis is categorical when drawing bars. A presentation flag only;
/// both orientations share one data path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// One drawable line per country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesLine {
    pub label: String,
    /// Aligned to `LineChartSpec::labels`; `None` draws a gap, not a zero.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartSpec {
    /// Year strings, one per slot in every series.
    pub labels: Vec<String>,
    pub series: Vec<SeriesLine>,
    pub x_axis_label: String,
    pub y_axis_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartSpec {
    /// Country names in selection order.
    pub labels: Vec<String>,
    /// One latest value per label; `None` leaves the slot empty.
    pub values: Vec<Option<f64>>,
    pub orientation: Orientation,
    pub x_axis_label: String,
    pub y_axis_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// `matrix[row][col]`, rows aligned to `row_labels`, cols to `col_labels`.
    pub matrix: Vec<Vec<Option<f64>>>,
    pub row_axis_label: String,
    pub col_axis_label: String,
}

/// The one value a generate run emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartOutput {
    Line(LineChartSpec),
    Bar(BarChartSpec),
    Table(TableSpec),
}
