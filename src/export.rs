//! Non-graphical output for shaped results: HTML and CSV for the table
//! shape, pretty JSON for any generate output.

use crate::present::{ChartOutput, TableSpec};
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Render a table spec as a plain HTML table. Absent cells show a dash,
/// values are fixed to two decimals; anything fancier is the embedder's job.
pub fn table_to_html(spec: &TableSpec) -> String {
    let mut html = String::from("<table class=\"data-table\">\n<thead><tr>");
    html.push_str(&format!(
        "<th>{} / {}</th>",
        spec.row_axis_label, spec.col_axis_label
    ));
    for col in &spec.col_labels {
        html.push_str(&format!("<th>{}</th>", col));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for (r, row_label) in spec.row_labels.iter().enumerate() {
        html.push_str(&format!("<tr><td>{}</td>", row_label));
        for c in 0..spec.col_labels.len() {
            match cell(spec, r, c) {
                Some(v) => html.push_str(&format!("<td>{:.2}</td>", v)),
                None => html.push_str("<td>\u{2014}</td>"),
            }
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

/// Save a table spec as CSV with a header row; row labels land in the first
/// column, absent cells stay empty.
pub fn save_table_csv<P: AsRef<Path>>(spec: &TableSpec, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    let mut header = vec![format!("{} / {}", spec.row_axis_label, spec.col_axis_label)];
    header.extend(spec.col_labels.iter().cloned());
    wtr.write_record(&header)?;
    for (r, row_label) in spec.row_labels.iter().enumerate() {
        let mut record = vec![row_label.clone()];
        for c in 0..spec.col_labels.len() {
            record.push(cell(spec, r, c).map(|v| v.to_string()).unwrap_or_default());
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save any generate output as a pretty JSON document.
pub fn save_spec_json<P: AsRef<Path>>(output: &ChartOutput, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(output)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

fn cell(spec: &TableSpec, r: usize, c: usize) -> Option<f64> {
    spec.matrix.get(r).and_then(|row| row.get(c)).copied().flatten()
}
