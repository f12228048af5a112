pub mod calibration_config;
pub mod decay_config;
pub mod defaults;

pub use calibration_config::CalibrationConfig;
pub use decay_config::DecayConfig;

use serde::{Deserialize, Serialize};

use crate::errors::TrustResult;

/// Top-level configuration for the Attest workspace. Every section has
/// sensible defaults; a config file only needs to name what it overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttestConfig {
    pub decay: DecayConfig,
    pub calibration: CalibrationConfig,
}

impl AttestConfig {
    /// Parse a TOML config string.
    pub fn from_toml(s: &str) -> TrustResult<Self> {
        Ok(toml::from_str(s)?)
    }
}
