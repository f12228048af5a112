use chrono::{DateTime, Utc};
use serde::Deserialize;

use attest_core::events::{EventKind, EventSource, Modality, VerificationResult};

/// Input for recording a verification event. Enum fields deserialize from
/// their wire strings, so malformed values are rejected before they reach
/// the log.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordVerification {
    pub person_id: String,
    pub concept_id: String,
    pub modality: Modality,
    pub result: VerificationResult,
    #[serde(default)]
    pub context: String,
    pub source: EventSource,
    /// Defaults to now when omitted.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Input for recording a self-reported confidence claim.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordClaim {
    pub person_id: String,
    pub concept_id: String,
    pub self_reported_confidence: f64,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Input for retracting a previously recorded event.
#[derive(Debug, Clone, Deserialize)]
pub struct RetractEvent {
    pub event_id: String,
    pub event_kind: EventKind,
    pub reason: String,
    pub retracted_by: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}
