use serde::{Deserialize, Serialize};

use crate::trust::TrustState;

/// Result of recording a claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimOutcome {
    pub recorded: bool,
    /// Current trust state for the claimed concept, if the pair has one.
    pub trust_state: Option<TrustState>,
    /// `self_reported − decayed_evidence`; positive = overclaiming.
    /// None when there is no evidence to compare against.
    pub calibration_gap: Option<f64>,
}

/// Result of a retraction request. Retracting an unknown event is a no-op,
/// not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetractionOutcome {
    pub retracted: bool,
    /// Number of trust states rewritten by the forced recompute.
    pub trust_states_affected: usize,
}

impl RetractionOutcome {
    /// The no-op outcome for an unknown or already-retracted event.
    pub fn noop() -> Self {
        Self {
            retracted: false,
            trust_states_affected: 0,
        }
    }
}
