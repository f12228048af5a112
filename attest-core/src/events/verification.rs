use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::modality::Modality;
use crate::errors::TrustError;

/// Outcome of one verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationResult {
    Demonstrated,
    Failed,
    Partial,
}

impl VerificationResult {
    /// Demonstrated and partial both count as confirming evidence.
    pub fn is_success_class(self) -> bool {
        matches!(self, Self::Demonstrated | Self::Partial)
    }

    pub fn is_failure_class(self) -> bool {
        matches!(self, Self::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Demonstrated => "demonstrated",
            Self::Failed => "failed",
            Self::Partial => "partial",
        }
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VerificationResult {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "demonstrated" => Ok(Self::Demonstrated),
            "failed" => Ok(Self::Failed),
            "partial" => Ok(Self::Partial),
            other => Err(TrustError::InvalidInput {
                message: format!(
                    "unknown verification result '{other}' \
                     (expected 'demonstrated', 'failed', or 'partial')"
                ),
            }),
        }
    }
}

/// Where the evidence came from: produced inside the system (a sandbox run,
/// a grilling session) or reported by an external observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    Internal,
    External,
}

impl EventSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }
}

impl FromStr for EventSource {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal" => Ok(Self::Internal),
            "external" => Ok(Self::External),
            other => Err(TrustError::InvalidInput {
                message: format!("unknown event source '{other}' (expected 'internal' or 'external')"),
            }),
        }
    }
}

/// One verification event in the append-only log. Immutable once written;
/// retraction flips the flag and writes an audit record, never deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationEvent {
    /// UUID v4 identifier.
    pub id: String,
    pub person_id: String,
    pub concept_id: String,
    pub modality: Modality,
    pub result: VerificationResult,
    /// Free-text provenance; richness of this field is an evidence proxy
    /// for downstream consumers.
    pub context: String,
    pub source: EventSource,
    pub timestamp: DateTime<Utc>,
    /// Monotone log position assigned by storage on append. Zero until
    /// persisted.
    #[serde(default)]
    pub seq: i64,
    #[serde(default)]
    pub retracted: bool,
}

impl VerificationEvent {
    pub fn new(
        person_id: &str,
        concept_id: &str,
        modality: Modality,
        result: VerificationResult,
        context: &str,
        source: EventSource,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            person_id: person_id.to_string(),
            concept_id: concept_id.to_string(),
            modality,
            result,
            context: context.to_string(),
            source,
            timestamp,
            seq: 0,
            retracted: false,
        }
    }
}

/// Identity equality — an event is its UUID.
impl PartialEq for VerificationEvent {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
