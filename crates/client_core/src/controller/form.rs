use shared::domain::INDICATORS;
use tracing::debug;

use crate::view::{ScoreInput, ViewState};

/// Appends one bounded score input per indicator, in registry order.
///
/// Meant to run once per page; a second call appends a second set of inputs.
pub fn build_score_form(view: &mut ViewState) {
    view.score_inputs
        .extend(INDICATORS.into_iter().map(ScoreInput::for_indicator));
    debug!(inputs = view.score_inputs.len(), "built score form");
}

/// Restores every input to empty without rebuilding the form.
pub fn clear_score_inputs(view: &mut ViewState) {
    for input in &mut view.score_inputs {
        input.value.clear();
    }
}
