use serde::{Deserialize, Serialize};

use super::defaults;

/// Decay subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Base half-life in days for a single-modality concept.
    pub base_half_life_days: f64,
    /// Half-life extension per additional distinct modality, as a fraction
    /// of the base.
    pub modality_half_life_factor: f64,
    /// Additive half-life days per downstream dependent.
    pub dependent_half_life_days: f64,
    /// Half-life ceiling in days.
    pub max_half_life_days: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            base_half_life_days: defaults::DEFAULT_BASE_HALF_LIFE_DAYS,
            modality_half_life_factor: defaults::DEFAULT_MODALITY_HALF_LIFE_FACTOR,
            dependent_half_life_days: defaults::DEFAULT_DEPENDENT_HALF_LIFE_DAYS,
            max_half_life_days: defaults::DEFAULT_MAX_HALF_LIFE_DAYS,
        }
    }
}
