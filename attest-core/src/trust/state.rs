use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::confidence::Confidence;
use super::level::TrustLevel;
use crate::events::Modality;

/// Derived trust for one (person, concept) pair. Never hand-edited:
/// always recomputable from the event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustState {
    pub person_id: String,
    pub concept_id: String,
    pub level: TrustLevel,
    pub confidence: Confidence,
    /// Timestamp of the most recent success-class event, if any.
    pub last_verified: Option<DateTime<Utc>>,
    /// Concepts whose verification propagated trust into this one.
    /// Invariant: non-empty iff level is Inferred.
    pub inferred_from: BTreeSet<String>,
    /// Distinct modalities across the concept's direct history.
    pub modalities_tested: BTreeSet<Modality>,
    /// Time-dependent view of confidence. Populated only at query time,
    /// never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decayed_confidence: Option<f64>,
    /// Claim-vs-evidence gap. Populated only at query time when a
    /// non-retracted claim exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration_gap: Option<f64>,
}

impl TrustState {
    /// A blank untested state for a pair with no evidence at all.
    pub fn untested(person_id: &str, concept_id: &str) -> Self {
        Self {
            person_id: person_id.to_string(),
            concept_id: concept_id.to_string(),
            level: TrustLevel::Untested,
            confidence: Confidence::new(0.0),
            last_verified: None,
            inferred_from: BTreeSet::new(),
            modalities_tested: BTreeSet::new(),
            decayed_confidence: None,
            calibration_gap: None,
        }
    }
}

/// Identity equality: a trust state is identified by its (person, concept)
/// pair, not its derived contents.
impl PartialEq for TrustState {
    fn eq(&self, other: &Self) -> bool {
        self.person_id == other.person_id && self.concept_id == other.concept_id
    }
}

/// The (graph, model, taxonomy) version triple in effect when a snapshot
/// was computed. Any component drifting invalidates the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionStamp {
    pub graph_version: u32,
    pub model_version: u32,
    pub taxonomy_version: u32,
}

impl VersionStamp {
    pub fn new(graph_version: u32, model_version: u32, taxonomy_version: u32) -> Self {
        Self {
            graph_version,
            model_version,
            taxonomy_version,
        }
    }
}

/// A cached projection row: the trust state plus the stamps that make it
/// verifiably fresh. Authoritative only while the stamps match the current
/// event log and versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustSnapshot {
    pub state: TrustState,
    /// Highest event sequence number this state was derived from.
    pub derived_from_event_seq: i64,
    pub stamp: VersionStamp,
    pub computed_at: DateTime<Utc>,
}
