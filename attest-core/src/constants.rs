/// Attest system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Milliseconds per day, the unit conversion used by decay.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Bonus per additional distinct modality, used by scoring and propagation.
pub const CROSS_MODALITY_BONUS: f64 = 0.1;

/// Weight of a partial result relative to a demonstration.
pub const PARTIAL_SUCCESS_WEIGHT: f64 = 0.5;

/// Flat confidence bump when partials accompany demonstrations.
pub const PARTIAL_PRESENCE_BUMP: f64 = 0.05;

/// Confidence assigned when failures land on a previously trusted concept.
pub const FAILURE_DOWNGRADE_CONFIDENCE: f64 = 0.2;

/// Failure signals propagate at this multiple of an equal-confidence success.
pub const FAILURE_SIGNAL_MULTIPLIER: f64 = 1.5;

/// Geometric attenuation per hop beyond the first.
pub const HOP_ATTENUATION: f64 = 0.5;

/// Signals below this are not worth propagating further.
pub const MIN_PROPAGATION_SIGNAL: f64 = 0.05;

/// A confidence delta at or below this is a no-op; the branch halts.
pub const MIN_STATE_DELTA: f64 = 0.001;

/// Maximum traversal depth for scope resolution and propagation walks.
/// A backstop against pathological graphs, far above any real pack.
pub const MAX_TRAVERSAL_DEPTH: usize = 50;
