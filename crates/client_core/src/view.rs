//! Owned view model standing in for the page markup.
//!
//! Controllers mutate it; front ends read it. Field names follow the page regions they
//! model (login screen, score grid, report header, output area, source list, admin area).

use std::{fmt::Write as _, sync::Arc};

use shared::domain::{Indicator, Rating, ScoreEntry, INDICATORS, SCORE_MAX, SCORE_MIN};
use tokio::sync::Mutex;

use crate::controller::report::ReportPhase;

pub type SharedView = Arc<Mutex<ViewState>>;

pub fn shared_view() -> SharedView {
    Arc::new(Mutex::new(ViewState::default()))
}

pub const SUMMARY_HEADING: &str = "診断結果サマリー";
pub const CHART_ALT: &str = "レーダーチャート";
pub const SUMMARY_ROWS: usize = 3;
pub const SUMMARY_COLUMNS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreInput {
    pub indicator: Indicator,
    pub id: String,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub min: u8,
    pub max: u8,
    pub step: u8,
    pub value: String,
}

impl ScoreInput {
    pub fn for_indicator(indicator: Indicator) -> Self {
        Self {
            indicator,
            id: indicator.input_id(),
            label: indicator.label(),
            placeholder: "0-40",
            min: SCORE_MIN,
            max: SCORE_MAX,
            step: 1,
            value: String::new(),
        }
    }
}

/// What the report output area currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputArea {
    #[default]
    Empty,
    /// Narrative rich text rendered as markup.
    Narrative(String),
    /// Plain text, e.g. a failure message.
    Text(String),
}

impl OutputArea {
    /// Markup as it reads back from the area.
    pub fn rendered_html(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Narrative(html) => html.clone(),
            Self::Text(text) => escape_text(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCell {
    pub indicator: Indicator,
    pub score: String,
}

/// Chart plus the 3x4 score table shown above the narrative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub chart_src: String,
    pub rows: Vec<Vec<SummaryCell>>,
}

impl ReportHeader {
    /// `timestamp_ms` goes into the chart url as the `t` query parameter.
    pub fn build(scores: &ScoreEntry, chart_url: &str, timestamp_ms: i64) -> Self {
        let rows = (0..SUMMARY_ROWS)
            .map(|row| {
                (0..SUMMARY_COLUMNS)
                    .filter_map(|column| INDICATORS.get(row * SUMMARY_COLUMNS + column))
                    .map(|indicator| SummaryCell {
                        indicator: *indicator,
                        score: scores.get(*indicator).to_string(),
                    })
                    .collect()
            })
            .collect();

        Self {
            chart_src: format!("{chart_url}?t={timestamp_ms}"),
            rows,
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &SummaryCell> {
        self.rows.iter().flatten()
    }

    pub fn to_html(&self) -> String {
        let mut table = String::from("<table>");
        for row in &self.rows {
            table.push_str("<tr>");
            for cell in row {
                let _ = write!(
                    table,
                    "<td><div class=\"indicator-name\">{}</div><div class=\"indicator-score\">{}</div></td>",
                    cell.indicator.label(),
                    escape_text(&cell.score)
                );
            }
            table.push_str("</tr>");
        }
        table.push_str("</table>");

        format!(
            "<h2>{SUMMARY_HEADING}</h2>\
             <div class=\"summary-grid\">\
             <div class=\"chart-container\"><img src=\"{}\" alt=\"{CHART_ALT}\"></div>\
             <div class=\"table-container\">{table}</div>\
             </div>",
            escape_html(&self.chart_src)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub login_screen_visible: bool,
    pub main_screen_visible: bool,
    pub login_button_enabled: bool,
    pub login_error: String,

    pub score_inputs: Vec<ScoreInput>,
    pub generate_enabled: bool,
    pub reset_enabled: bool,
    pub loading_visible: bool,
    pub report_phase: ReportPhase,
    pub header: Option<ReportHeader>,
    pub output: OutputArea,
    pub sources: Vec<String>,

    pub admin_area_visible: bool,
    pub feedback_rating: Option<Rating>,
    pub feedback_comment: String,
    pub feedback_confirmation: Option<String>,
    /// Bumped each time a confirmation is raised; a hide timer only clears its own.
    pub(crate) confirmation_seq: u64,

    /// Blocking notices, oldest first.
    pub notices: Vec<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            login_screen_visible: true,
            main_screen_visible: false,
            login_button_enabled: true,
            login_error: String::new(),
            score_inputs: Vec::new(),
            generate_enabled: true,
            reset_enabled: true,
            loading_visible: false,
            report_phase: ReportPhase::Idle,
            header: None,
            output: OutputArea::Empty,
            sources: Vec::new(),
            admin_area_visible: false,
            feedback_rating: None,
            feedback_comment: String::new(),
            feedback_confirmation: None,
            confirmation_seq: 0,
            notices: Vec::new(),
        }
    }
}

impl ViewState {
    pub fn score_input(&self, indicator: Indicator) -> Option<&ScoreInput> {
        self.score_inputs
            .iter()
            .find(|input| input.indicator == indicator)
    }

    /// Types into the score input for `indicator`. Returns false when the form has no
    /// such input.
    pub fn set_score(&mut self, indicator: Indicator, raw: impl Into<String>) -> bool {
        match self
            .score_inputs
            .iter_mut()
            .find(|input| input.indicator == indicator)
        {
            Some(input) => {
                input.value = raw.into();
                true
            }
            None => false,
        }
    }

    /// Current input values. An indicator without an input reads as empty.
    pub fn score_entry(&self) -> ScoreEntry {
        INDICATORS
            .into_iter()
            .map(|indicator| {
                let raw = self
                    .score_input(indicator)
                    .map(|input| input.value.clone())
                    .unwrap_or_default();
                (indicator, raw)
            })
            .collect()
    }

    pub fn notify(&mut self, notice: impl Into<String>) {
        self.notices.push(notice.into());
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }
}

/// Escapes for attribute values as well as text content.
pub fn escape_html(raw: &str) -> String {
    escape(raw, true)
}

/// Escapes text content the way markup serialisation does: quotes stay as they are.
pub fn escape_text(raw: &str) -> String {
    escape(raw, false)
}

fn escape(raw: &str, quotes: bool) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if quotes => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
