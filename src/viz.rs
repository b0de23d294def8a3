//! Draw chart specs with Plotters.
//!
//! SVG or bitmap output is chosen by file extension. These renderers are
//! consumers of the presentation boundary: they only ever see the shaped
//! [`LineChartSpec`] / [`BarChartSpec`], never raw observations. Absent
//! values render as gaps (line runs split, bars skipped), never as zero.

use crate::present::{BarChartSpec, LineChartSpec, Orientation};
use anyhow::{Result, anyhow};
use num_format::{Locale, ToFormattedString};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;

/// Render a line spec to `out_path` (`.svg` or a bitmap format).
pub fn render_line_chart<P: AsRef<Path>>(
    spec: &LineChartSpec,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    if spec.series.is_empty() {
        return Err(anyhow!("no series to plot"));
    }
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    if is_svg(out_path) {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_lines(root, spec)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_lines(root, spec)
    }
}

/// Render a bar spec to `out_path` (`.svg` or a bitmap format), honoring its
/// orientation flag.
pub fn render_bar_chart<P: AsRef<Path>>(
    spec: &BarChartSpec,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    if spec.labels.is_empty() {
        return Err(anyhow!("no bars to plot"));
    }
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    if is_svg(out_path) {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_bars(root, spec)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_bars(root, spec)
    }
}

fn is_svg(p: &Path) -> bool {
    p.extension().and_then(|s| s.to_str()) == Some("svg")
}

/// Helper that draws lines to any Plotters backend.
fn draw_lines<DB>(root: DrawingArea<DB, Shift>, spec: &LineChartSpec) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let n = spec.labels.len().max(1);
    let (min_val, max_val) =
        value_bounds(spec.series.iter().flat_map(|s| s.values.iter().copied()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(spec.y_axis_label.as_str(), (FontFamily::SansSerif, 24))
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(0..(n as i32 - 1).max(1), min_val..max_val)
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_label_fmt = |x: &i32| slot_label(&spec.labels, *x);
    let y_label_fmt = |v: &f64| format_value(*v);

    chart
        .configure_mesh()
        .x_desc(spec.x_axis_label.as_str())
        .y_desc(spec.y_axis_label.as_str())
        .x_labels(n.min(12))
        .y_labels(10)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, 14))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    for (idx, series) in spec.series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let style = ShapeStyle {
            color: color.clone(),
            filled: false,
            stroke_width: 2,
        };

        // Split on absent values so gaps stay visible instead of bridged.
        let mut labeled = false;
        for run in present_runs(&series.values) {
            let anno = if run.len() == 1 {
                chart.draw_series(
                    run.iter()
                        .map(|&(x, v)| Circle::new((x, v), 3, color.clone().filled())),
                )
            } else {
                chart.draw_series(LineSeries::new(run, style.clone()))
            }
            .map_err(|e| anyhow!("{:?}", e))?;

            if !labeled {
                let legend_color = color.clone();
                anno.label(series.label.clone()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 24, y)], legend_color.clone())
                });
                labeled = true;
            }
        }
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.85))
        .label_font((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Helper that draws bars to any Plotters backend.
fn draw_bars<DB>(root: DrawingArea<DB, Shift>, spec: &BarChartSpec) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let n = spec.labels.len();
    let (mut min_val, mut max_val) = value_bounds(spec.values.iter().copied())?;
    // Bars grow from zero, so the value axis must include it.
    min_val = min_val.min(0.0);
    max_val = max_val.max(0.0);

    let color = Palette99::pick(0).to_rgba();
    let caption = match spec.orientation {
        Orientation::Vertical => spec.y_axis_label.as_str(),
        Orientation::Horizontal => spec.x_axis_label.as_str(),
    };

    match spec.orientation {
        Orientation::Vertical => {
            let mut chart = ChartBuilder::on(&root)
                .margin(20)
                .caption(caption, (FontFamily::SansSerif, 24))
                .set_label_area_size(LabelAreaPosition::Left, 80)
                .set_label_area_size(LabelAreaPosition::Bottom, 44)
                .build_cartesian_2d(-1f64..n as f64, min_val..max_val)
                .map_err(|e| anyhow!("{:?}", e))?;

            let x_label_fmt = |x: &f64| category_label(&spec.labels, *x);
            let y_label_fmt = |v: &f64| format_value(*v);
            chart
                .configure_mesh()
                .x_desc(spec.x_axis_label.as_str())
                .y_desc(spec.y_axis_label.as_str())
                .x_labels(n.min(20) + 2)
                .y_labels(10)
                .x_label_formatter(&x_label_fmt)
                .y_label_formatter(&y_label_fmt)
                .label_style((FontFamily::SansSerif, 14))
                .axis_desc_style((FontFamily::SansSerif, 16))
                .draw()
                .map_err(|e| anyhow!("{:?}", e))?;

            for (i, v) in spec.values.iter().enumerate() {
                let Some(v) = v else { continue };
                let (x0, x1) = (i as f64 - 0.4, i as f64 + 0.4);
                let (y0, y1) = (0f64.min(*v), 0f64.max(*v));
                chart
                    .draw_series(std::iter::once(Rectangle::new(
                        [(x0, y0), (x1, y1)],
                        color.clone().filled(),
                    )))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
        }
        Orientation::Horizontal => {
            let mut chart = ChartBuilder::on(&root)
                .margin(20)
                .caption(caption, (FontFamily::SansSerif, 24))
                .set_label_area_size(LabelAreaPosition::Left, 120)
                .set_label_area_size(LabelAreaPosition::Bottom, 44)
                .build_cartesian_2d(min_val..max_val, -1f64..n as f64)
                .map_err(|e| anyhow!("{:?}", e))?;

            let x_label_fmt = |v: &f64| format_value(*v);
            let y_label_fmt = |y: &f64| category_label(&spec.labels, *y);
            chart
                .configure_mesh()
                .x_desc(spec.x_axis_label.as_str())
                .y_desc(spec.y_axis_label.as_str())
                .x_labels(10)
                .y_labels(n.min(20) + 2)
                .x_label_formatter(&x_label_fmt)
                .y_label_formatter(&y_label_fmt)
                .label_style((FontFamily::SansSerif, 14))
                .axis_desc_style((FontFamily::SansSerif, 16))
                .draw()
                .map_err(|e| anyhow!("{:?}", e))?;

            for (i, v) in spec.values.iter().enumerate() {
                let Some(v) = v else { continue };
                let (y0, y1) = (i as f64 - 0.4, i as f64 + 0.4);
                let (x0, x1) = (0f64.min(*v), 0f64.max(*v));
                chart
                    .draw_series(std::iter::once(Rectangle::new(
                        [(x0, y0), (x1, y1)],
                        color.clone().filled(),
                    )))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
        }
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Split a value row into runs of consecutive present values, x = slot index.
fn present_runs(values: &[Option<f64>]) -> Vec<Vec<(i32, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(i32, f64)> = Vec::new();
    for (i, v) in values.iter().enumerate() {
        match v {
            Some(v) => current.push((i as i32, *v)),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Padded numeric range over the present values; a degenerate range widens
/// by one unit either side so the chart still has height.
fn value_bounds(values: impl Iterator<Item = Option<f64>>) -> Result<(f64, f64)> {
    let vals: Vec<f64> = values.flatten().filter(|v| v.is_finite()).collect();
    if vals.is_empty() {
        return Err(anyhow!("no numeric values to plot"));
    }
    let mut min = vals.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut max = vals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        min -= 1.0;
        max += 1.0;
    }
    Ok((min, max))
}

/// Label a line-chart slot by index.
fn slot_label(labels: &[String], x: i32) -> String {
    usize::try_from(x)
        .ok()
        .and_then(|i| labels.get(i))
        .cloned()
        .unwrap_or_default()
}

/// Label a bar-category tick: only positions close to a bar center get text.
fn category_label(labels: &[String], pos: f64) -> String {
    let idx = pos.round();
    if (pos - idx).abs() > 0.25 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Tick label: thousands separators for large magnitudes, short decimals
/// otherwise (indicator units are often percentages).
fn format_value(v: f64) -> String {
    let a = v.abs();
    if a >= 1000.0 {
        (v.round() as i64).to_formatted_string(&Locale::en)
    } else if a >= 100.0 {
        format!("{:.0}", v)
    } else if a >= 10.0 {
        format!("{:.1}", v)
    } else {
        format!("{:.2}", v)
    }
}
