use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::trust::VersionStamp;

/// High-water mark for one projected scope: the event sequence the cached
/// snapshots were replayed up to, and the versions in effect at the time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Content-derived scope key (person + sorted member concepts).
    pub scope_key: String,
    pub person_id: String,
    pub event_seq: i64,
    pub stamp: VersionStamp,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Complete,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Complete => "complete",
        }
    }
}

/// A queued rebuild request for a scope. The projector marks all pending
/// jobs for a scope complete inside the same transaction that commits the
/// rebuilt snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionJob {
    pub id: i64,
    pub scope_key: String,
    pub person_id: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}
