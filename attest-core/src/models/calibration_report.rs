use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only calibration audit over all of a person's trust states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationReport {
    pub person_id: String,
    pub as_of: DateTime<Utc>,
    /// Fraction of evaluated predictions the evidence confirmed.
    pub prediction_accuracy: f64,
    /// Fraction of evaluated predictions the last event contradicted.
    pub surprise_rate: f64,
    /// Mean confidence magnitude on mismatches where the system predicted
    /// success but the person failed.
    pub overconfidence: f64,
    /// Mean shortfall magnitude on mismatches where the system predicted
    /// failure but the person demonstrated.
    pub underconfidence: f64,
    /// Fraction of concepts unverified for too long, or inferred with no
    /// direct evidence at all.
    pub stale_percentage: f64,
    /// `1 − mean(|claim − decayed evidence|)`, floored at 0. None when the
    /// person has made no claims.
    pub claim_calibration: Option<f64>,
    pub concepts_audited: usize,
    pub predictions_evaluated: usize,
    /// Single human-readable recommendation chosen by a fixed priority
    /// table over the metrics above.
    pub recommendation: String,
}

impl CalibrationReport {
    /// The all-zero report for a person with no trust data at all.
    pub fn empty(person_id: &str, as_of: DateTime<Utc>) -> Self {
        Self {
            person_id: person_id.to_string(),
            as_of,
            prediction_accuracy: 0.0,
            surprise_rate: 0.0,
            overconfidence: 0.0,
            underconfidence: 0.0,
            stale_percentage: 0.0,
            claim_calibration: None,
            concepts_audited: 0,
            predictions_evaluated: 0,
            recommendation: "no trust data".to_string(),
        }
    }
}
