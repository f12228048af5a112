//! Per-concern SQL modules. Everything here takes a plain `&Connection`;
//! transaction boundaries belong to the engine.

pub mod checkpoint_ops;
pub mod claim_ops;
pub mod concept_ops;
pub mod event_ops;
pub mod job_ops;
pub mod retraction_ops;
pub mod snapshot_ops;
pub mod version_ops;

use chrono::{DateTime, Utc};

use attest_core::errors::TrustResult;

use crate::to_storage_err;

/// Parse an RFC3339 column back into a UTC timestamp.
pub(crate) fn parse_ts(raw: &str) -> TrustResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse timestamp '{raw}': {e}")))
}

/// `?1, ?2, …, ?n` placeholder list for dynamic IN clauses.
pub(crate) fn placeholders(n: usize) -> String {
    (1..=n).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ")
}
