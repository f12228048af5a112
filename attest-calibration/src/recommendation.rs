//! The deterministic decision table mapping the worst offending metric to
//! one human-readable recommendation.

use attest_core::config::CalibrationConfig;

/// The fixed recommendation strings, one per table row.
pub const NO_TRUST_DATA: &str = "no trust data";
pub const STALE: &str = "trust is going stale; re-verify long-unverified concepts";
pub const OVERCONFIDENT: &str =
    "confidence runs ahead of the evidence; expect failures where you feel sure";
pub const UNDERCONFIDENT: &str =
    "confidence lags the evidence; trust your demonstrated skills more";
pub const SURPRISING: &str =
    "verification outcomes are unpredictable; verify more often across modalities";
pub const MISCALIBRATED_CLAIMS: &str =
    "self-reports diverge from the evidence; recalibrate claims against results";
pub const INSUFFICIENT_DATA: &str =
    "insufficient data: too few repeat verifications to audit calibration";
pub const NOMINAL: &str = "calibration nominal";

/// Metric inputs to the table.
pub struct MetricSummary {
    pub concepts_audited: usize,
    pub predictions_evaluated: usize,
    pub surprise_rate: f64,
    pub overconfidence: f64,
    pub underconfidence: f64,
    pub stale_percentage: f64,
    pub claim_calibration: Option<f64>,
}

/// Walk the table in fixed priority order:
/// staleness > overconfidence > underconfidence > surprise rate >
/// claim miscalibration > insufficient data > nominal.
///
/// Accuracy-derived rows only fire once enough predictions exist;
/// staleness and claim rows are observational and always eligible.
pub fn recommend(config: &CalibrationConfig, metrics: &MetricSummary) -> &'static str {
    if metrics.concepts_audited == 0 {
        return NO_TRUST_DATA;
    }

    let enough_predictions = metrics.predictions_evaluated >= config.min_predictions;

    if metrics.stale_percentage > config.staleness_alert {
        return STALE;
    }
    if enough_predictions && metrics.overconfidence > config.bias_alert {
        return OVERCONFIDENT;
    }
    if enough_predictions && metrics.underconfidence > config.bias_alert {
        return UNDERCONFIDENT;
    }
    if enough_predictions && metrics.surprise_rate > config.surprise_alert {
        return SURPRISING;
    }
    if let Some(calibration) = metrics.claim_calibration {
        if calibration < config.claim_calibration_alert {
            return MISCALIBRATED_CLAIMS;
        }
    }
    if !enough_predictions {
        return INSUFFICIENT_DATA;
    }
    NOMINAL
}
