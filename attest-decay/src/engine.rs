use chrono::{DateTime, Utc};

use attest_core::config::DecayConfig;
use attest_core::trust::TrustState;

use crate::formula::{self, DecayInput};

/// Decay engine: the half-life formula plus the glue that reads the inputs
/// off a trust state.
#[derive(Debug, Default)]
pub struct DecayEngine {
    config: DecayConfig,
}

impl DecayEngine {
    pub fn new(config: DecayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    /// Raw formula access for callers that already hold the inputs.
    pub fn compute(&self, input: &DecayInput) -> f64 {
        formula::compute(&self.config, input)
    }

    /// Decayed view of a trust state at `as_of`. The downstream dependent
    /// count is structural and comes from the graph, not the state.
    pub fn decayed_confidence(
        &self,
        state: &TrustState,
        as_of: DateTime<Utc>,
        downstream_dependents: usize,
    ) -> f64 {
        self.compute(&DecayInput {
            confidence: state.confidence.value(),
            last_verified: state.last_verified,
            as_of,
            modality_count: state.modalities_tested.len(),
            downstream_dependents,
        })
    }
}
