//! Default values shared by the config structs.

/// Base confidence half-life in days (single modality, no dependents).
pub const DEFAULT_BASE_HALF_LIFE_DAYS: f64 = 30.0;

/// Each additional distinct modality extends the half-life by this fraction
/// of the base.
pub const DEFAULT_MODALITY_HALF_LIFE_FACTOR: f64 = 0.5;

/// Additive half-life days per downstream dependent (structural importance).
pub const DEFAULT_DEPENDENT_HALF_LIFE_DAYS: f64 = 5.0;

/// Half-life ceiling in days.
pub const DEFAULT_MAX_HALF_LIFE_DAYS: f64 = 365.0;

/// Days without verification before a concept counts as stale.
pub const DEFAULT_STALE_AFTER_DAYS: i64 = 60;

/// Stale fraction above which the audit recommends re-verification.
pub const DEFAULT_STALENESS_ALERT: f64 = 0.5;

/// Mean mismatch magnitude above which over/under-confidence is flagged.
pub const DEFAULT_BIAS_ALERT: f64 = 0.2;

/// Surprise rate above which the audit flags unpredictability.
pub const DEFAULT_SURPRISE_ALERT: f64 = 0.3;

/// Claim calibration below which the audit flags miscalibrated claims.
pub const DEFAULT_CLAIM_CALIBRATION_ALERT: f64 = 0.7;

/// Minimum evaluated predictions for the accuracy metrics to be meaningful.
pub const DEFAULT_MIN_PREDICTIONS: usize = 3;
