use serde::{Deserialize, Serialize};

use super::defaults;

/// Calibration audit configuration: staleness window and the thresholds
/// behind the recommendation decision table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Days without verification before a concept counts as stale.
    pub stale_after_days: i64,
    /// Stale fraction that triggers the staleness recommendation.
    pub staleness_alert: f64,
    /// Mean mismatch magnitude that triggers the bias recommendations.
    pub bias_alert: f64,
    /// Surprise rate that triggers the surprise recommendation.
    pub surprise_alert: f64,
    /// Claim calibration floor below which claims are flagged.
    pub claim_calibration_alert: f64,
    /// Minimum evaluated predictions before accuracy metrics count.
    pub min_predictions: usize,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            stale_after_days: defaults::DEFAULT_STALE_AFTER_DAYS,
            staleness_alert: defaults::DEFAULT_STALENESS_ALERT,
            bias_alert: defaults::DEFAULT_BIAS_ALERT,
            surprise_alert: defaults::DEFAULT_SURPRISE_ALERT,
            claim_calibration_alert: defaults::DEFAULT_CLAIM_CALIBRATION_ALERT,
            min_predictions: defaults::DEFAULT_MIN_PREDICTIONS,
        }
    }
}
