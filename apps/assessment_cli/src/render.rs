//! Plain-text rendering of the view model for the terminal.

use std::fmt::Write as _;

use anyhow::{ensure, Result};
use client_core::{view::OutputArea, ViewState};
use shared::domain::INDICATORS;

pub fn render_report(view: &ViewState) -> String {
    let mut out = String::new();

    if let Some(header) = &view.header {
        let _ = writeln!(out, "== {} ==", client_core::view::SUMMARY_HEADING);
        let _ = writeln!(out, "chart: {}", header.chart_src);
        for row in &header.rows {
            let line = row
                .iter()
                .map(|cell| format!("{} {:>2}", cell.indicator.label(), cell.score))
                .collect::<Vec<_>>()
                .join(" | ");
            let _ = writeln!(out, "{line}");
        }
    }

    match &view.output {
        OutputArea::Empty => {}
        OutputArea::Narrative(html) => {
            let _ = writeln!(out, "\n{html}");
        }
        OutputArea::Text(text) => {
            let _ = writeln!(out, "{text}");
        }
    }

    if !view.sources.is_empty() {
        let _ = writeln!(out, "\nsources:");
        for source in &view.sources {
            let _ = writeln!(out, "  - {source}");
        }
    }

    out
}

/// The report regions as page markup: header, then the output area.
pub fn render_html(view: &ViewState) -> String {
    let mut out = view
        .header
        .as_ref()
        .map(|header| header.to_html())
        .unwrap_or_default();
    out.push_str(&view.output.rendered_html());
    out
}

/// Splits `--scores` into per-indicator raw values. Missing trailing values stay empty
/// so validation reports them; more values than indicators is an error.
pub fn split_scores(raw: &str) -> Result<Vec<String>> {
    let values: Vec<String> = raw.split(',').map(|value| value.trim().to_string()).collect();
    ensure!(
        values.len() <= INDICATORS.len(),
        "expected at most {} scores, got {}",
        INDICATORS.len(),
        values.len()
    );
    Ok(values)
}
