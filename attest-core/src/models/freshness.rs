use serde::{Deserialize, Serialize};

/// Why a cached scope can no longer be served. Each mismatch the freshness
/// check finds is reported as its own reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StaleReason {
    /// The scope has never been projected.
    NoCheckpoint,
    /// Events were appended after the checkpoint was written.
    CheckpointBehind { checkpoint_seq: i64, latest_seq: i64 },
    /// A concept in scope has no cached snapshot at all.
    MissingSnapshot { concept_id: String },
    /// A snapshot was derived from an older event sequence.
    SnapshotBehind {
        concept_id: String,
        derived_from_seq: i64,
        latest_seq: i64,
    },
    /// The concept graph changed since this scope was projected.
    GraphVersionDrift { stamped: u32, current: u32 },
    /// Scoring/propagation rules changed since projection.
    ModelVersionDrift { stamped: u32, current: u32 },
    /// The modality taxonomy changed since projection.
    TaxonomyVersionDrift { stamped: u32, current: u32 },
}

/// Freshness verdict for one scope. Staleness is never an error — it is
/// the trigger for a deterministic rebuild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeFreshness {
    pub fresh: bool,
    pub reasons: Vec<StaleReason>,
}

impl ScopeFreshness {
    pub fn fresh() -> Self {
        Self {
            fresh: true,
            reasons: Vec::new(),
        }
    }

    pub fn stale(reasons: Vec<StaleReason>) -> Self {
        Self {
            fresh: false,
            reasons,
        }
    }
}
