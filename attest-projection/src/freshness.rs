//! Staleness detection. Every mismatch between the cache and the current
//! log/graph/versions is reported as a specific reason; none of them is an
//! error.

use std::collections::HashMap;

use attest_core::errors::TrustResult;
use attest_core::models::{ScopeFreshness, StaleReason};
use attest_core::traits::ITrustStore;
use attest_core::trust::VersionStamp;

use crate::scope::ScopeMembers;

/// Compare the scope's cache against the current event log and versions.
pub fn check_freshness(
    store: &dyn ITrustStore,
    members: &ScopeMembers,
) -> TrustResult<ScopeFreshness> {
    let current = store.version_stamp()?;
    let latest_seq = store.latest_event_seq(&members.person_id, &members.concept_ids)?;

    let mut reasons = Vec::new();

    match store.get_checkpoint(&members.key)? {
        None => reasons.push(StaleReason::NoCheckpoint),
        Some(checkpoint) => {
            if checkpoint.event_seq < latest_seq {
                reasons.push(StaleReason::CheckpointBehind {
                    checkpoint_seq: checkpoint.event_seq,
                    latest_seq,
                });
            }
            push_version_drift(&mut reasons, checkpoint.stamp, current);
        }
    }

    let snapshots = store.snapshots_for(&members.person_id, &members.concept_ids)?;
    let by_concept: HashMap<&str, _> = snapshots
        .iter()
        .map(|s| (s.state.concept_id.as_str(), s))
        .collect();

    for concept_id in &members.concept_ids {
        match by_concept.get(concept_id.as_str()) {
            None => reasons.push(StaleReason::MissingSnapshot {
                concept_id: concept_id.clone(),
            }),
            Some(snapshot) => {
                if snapshot.derived_from_event_seq < latest_seq {
                    reasons.push(StaleReason::SnapshotBehind {
                        concept_id: concept_id.clone(),
                        derived_from_seq: snapshot.derived_from_event_seq,
                        latest_seq,
                    });
                }
                if snapshot.stamp != current {
                    push_version_drift(&mut reasons, snapshot.stamp, current);
                }
            }
        }
    }

    reasons.dedup();
    if reasons.is_empty() {
        Ok(ScopeFreshness::fresh())
    } else {
        Ok(ScopeFreshness::stale(reasons))
    }
}

fn push_version_drift(reasons: &mut Vec<StaleReason>, stamped: VersionStamp, current: VersionStamp) {
    if stamped.graph_version != current.graph_version {
        reasons.push(StaleReason::GraphVersionDrift {
            stamped: stamped.graph_version,
            current: current.graph_version,
        });
    }
    if stamped.model_version != current.model_version {
        reasons.push(StaleReason::ModelVersionDrift {
            stamped: stamped.model_version,
            current: current.model_version,
        });
    }
    if stamped.taxonomy_version != current.taxonomy_version {
        reasons.push(StaleReason::TaxonomyVersionDrift {
            stamped: stamped.taxonomy_version,
            current: current.taxonomy_version,
        });
    }
}
