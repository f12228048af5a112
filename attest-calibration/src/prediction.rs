//! Treat the pre-last-event confidence as a prediction and check it
//! against what the last event actually showed.

use attest_core::events::VerificationEvent;
use attest_scoring::score_history;

/// Outcome of evaluating one concept's prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PredictionOutcome {
    /// The evidence confirmed the prediction.
    Accurate,
    /// Predicted success (confidence ≥ 0.5) but the person failed.
    Overconfident { margin: f64 },
    /// Predicted failure (confidence < 0.5) but the person demonstrated.
    Underconfident { margin: f64 },
}

/// The confidence threshold that turns a number into a prediction.
pub const PREDICTION_BOUNDARY: f64 = 0.5;

/// Evaluate one concept's non-retracted history. Needs at least two events:
/// everything before the last is the basis, the last is the test.
pub fn evaluate(history: &[VerificationEvent]) -> Option<PredictionOutcome> {
    if history.len() < 2 {
        return None;
    }
    let (last, basis) = history.split_last()?;

    // Direct evidence only; propagated trust is invisible to this audit.
    let predicted = score_history(basis, None).confidence.value();
    let predicted_success = predicted >= PREDICTION_BOUNDARY;

    let outcome = if last.result.is_success_class() {
        if predicted_success {
            PredictionOutcome::Accurate
        } else {
            PredictionOutcome::Underconfident {
                margin: PREDICTION_BOUNDARY - predicted,
            }
        }
    } else if predicted_success {
        PredictionOutcome::Overconfident {
            margin: predicted - PREDICTION_BOUNDARY,
        }
    } else {
        PredictionOutcome::Accurate
    };

    Some(outcome)
}
