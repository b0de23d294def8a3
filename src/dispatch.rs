//! Routes a validated selection to the right fetch + reshape path.
//!
//! One decision point, no state between invocations: the axis pair's chart
//! shape picks the path, the path fetches what it needs and reshapes it into
//! the matching spec. Any failure aborts the whole run, so callers never see
//! partial output.

use crate::aggregate;
use crate::api::SeriesSource;
use crate::error::WbxError;
use crate::present::{
    BarChartSpec, ChartOutput, LineChartSpec, Orientation, SeriesLine, TableSpec,
};
use crate::registry::{self, ChartShape, Dimension, chart_shape_for};
use crate::resolve::{ResolvedParams, resolve};
use crate::session::SelectionState;
use futures::future::try_join_all;
use tracing::debug;

/// Run one generate: validate, fetch, reshape, emit.
///
/// Validation happens entirely before the first fetch. The engine holds no
/// state across calls; the interface layer is expected to keep its trigger
/// disabled while a run is in flight and to clear prior presentation output
/// before drawing a new result.
pub async fn generate<S>(source: &S, state: &SelectionState) -> Result<ChartOutput, WbxError>
where
    S: SeriesSource + Sync,
{
    let params = resolve(state)?;
    let (x, y) = (state.x_axis, state.y_axis);
    let shape = chart_shape_for(x, y);
    debug!(x = x.id(), y = y.id(), ?shape, "dispatching generate");

    match shape {
        ChartShape::Line => line_chart(source, x, y, &params).await.map(ChartOutput::Line),
        ChartShape::VerticalBar => bar_chart(source, x, y, &params, Orientation::Vertical)
            .await
            .map(ChartOutput::Bar),
        ChartShape::HorizontalBar => bar_chart(source, x, y, &params, Orientation::Horizontal)
            .await
            .map(ChartOutput::Bar),
        ChartShape::Table => table(source, &params).await.map(ChartOutput::Table),
    }
}

/// The indicator an axis pair fetches: the first of (x, y) bound to a remote
/// code. A pair without one (time x time, country x time) has nothing to
/// fetch.
fn indicator_axis(x: Dimension, y: Dimension) -> Result<(Dimension, &'static str), WbxError> {
    [x, y]
        .into_iter()
        .find_map(|d| d.indicator_code().map(|code| (d, code)))
        .ok_or(WbxError::InvalidDimensionPair)
}

fn country_codes(params: &ResolvedParams) -> Vec<String> {
    params.countries.iter().map(|c| c.code.clone()).collect()
}

/// Continuous x continuous: one line per country over the year range.
async fn line_chart<S: SeriesSource + Sync>(
    source: &S,
    x: Dimension,
    y: Dimension,
    params: &ResolvedParams,
) -> Result<LineChartSpec, WbxError> {
    let (indicator, code) = indicator_axis(x, y)?;
    let raw = source
        .fetch_series(&country_codes(params), code, params.start_year, params.end_year)
        .await?;
    if raw.is_empty() {
        return Err(WbxError::NoData);
    }

    let series = aggregate::build_aligned_series(
        &params.countries,
        &raw,
        params.start_year,
        params.end_year,
    )
    .into_iter()
    .map(|s| SeriesLine {
        label: s.country_label,
        values: s.values,
    })
    .collect();

    Ok(LineChartSpec {
        labels: aggregate::year_labels(params.start_year, params.end_year),
        series,
        x_axis_label: "Year".into(),
        y_axis_label: indicator.label().into(),
    })
}

/// Country x indicator in either orientation: one latest value per country.
async fn bar_chart<S: SeriesSource + Sync>(
    source: &S,
    x: Dimension,
    y: Dimension,
    params: &ResolvedParams,
    orientation: Orientation,
) -> Result<BarChartSpec, WbxError> {
    let (indicator, code) = indicator_axis(x, y)?;
    let raw = source
        .fetch_series(&country_codes(params), code, params.start_year, params.end_year)
        .await?;
    if raw.is_empty() {
        return Err(WbxError::NoData);
    }

    let rows = aggregate::build_latest_value_rows(&params.countries, &raw);
    let (labels, values): (Vec<_>, Vec<_>) = rows
        .into_iter()
        .map(|r| (r.country_label, r.value))
        .unzip();

    let (x_axis_label, y_axis_label) = match orientation {
        Orientation::Vertical => ("Country".to_string(), indicator.label().to_string()),
        Orientation::Horizontal => (indicator.label().to_string(), "Country".to_string()),
    };

    Ok(BarChartSpec {
        labels,
        values,
        orientation,
        x_axis_label,
        y_axis_label,
    })
}

/// Discrete x discrete: the full countries x indicators latest-value matrix.
///
/// Fetches every registry indicator, not just the chosen axes; the fetches
/// run concurrently and are joined all-or-nothing, so one failing indicator
/// fails the table rather than leaving holes.
async fn table<S: SeriesSource + Sync>(
    source: &S,
    params: &ResolvedParams,
) -> Result<TableSpec, WbxError> {
    let codes = country_codes(params);
    let indicators: Vec<Dimension> = registry::indicator_dimensions().collect();

    let fetches = indicators
        .iter()
        .filter_map(|d| d.indicator_code())
        .map(|code| source.fetch_series(&codes, code, params.start_year, params.end_year));
    let per_indicator = try_join_all(fetches).await?;

    let rows_per_indicator: Vec<Vec<aggregate::LatestValueRow>> = per_indicator
        .iter()
        .map(|raw| aggregate::build_latest_value_rows(&params.countries, raw))
        .collect();

    Ok(TableSpec {
        row_labels: params.countries.iter().map(|c| c.name.clone()).collect(),
        col_labels: indicators.iter().map(|d| d.label().to_string()).collect(),
        matrix: aggregate::build_matrix(&params.countries, &rows_per_indicator),
        row_axis_label: "Country".into(),
        col_axis_label: "Indicator".into(),
    })
}
