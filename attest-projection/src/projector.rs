//! Full deterministic scope rebuild: replay the ordered event history,
//! score and propagate per event, then atomically rewrite the cache.

use std::collections::HashMap;

use chrono::Utc;

use attest_core::errors::TrustResult;
use attest_core::graph::ConceptEdge;
use attest_core::models::Checkpoint;
use attest_core::traits::ITrustStore;
use attest_core::trust::{TrustLevel, TrustSnapshot, TrustState};
use attest_propagation::{base_signal, propagate, ScopeGraph};
use attest_scoring::score_history;

use crate::freshness::check_freshness;
use crate::scope::ScopeMembers;

/// Recompute a scope from scratch and commit the result atomically.
/// Returns the committed snapshots (one per member concept, untested rows
/// included, so a later freshness check can tell "computed as untested"
/// from "never computed").
pub fn project_scope(
    store: &dyn ITrustStore,
    members: &ScopeMembers,
) -> TrustResult<Vec<TrustSnapshot>> {
    let stamp = store.version_stamp()?;
    let latest_seq = store.latest_event_seq(&members.person_id, &members.concept_ids)?;

    let mut events =
        store.scope_verification_history(&members.person_id, &members.concept_ids)?;
    // Storage already orders the read; re-sort so determinism does not
    // depend on the backend honoring it.
    events.sort_by(|a, b| {
        (a.timestamp, a.seq, a.id.as_str()).cmp(&(b.timestamp, b.seq, b.id.as_str()))
    });

    let graph = ScopeGraph::build(&members.concept_ids, &scope_edges(store, members)?);

    let mut states: HashMap<String, TrustState> = HashMap::new();
    let mut histories: HashMap<String, Vec<attest_core::events::VerificationEvent>> =
        HashMap::new();

    for event in events {
        let concept_id = event.concept_id.clone();
        let history = histories.entry(concept_id.clone()).or_default();
        history.push(event.clone());

        let prior = states.get(&concept_id);
        let scored = score_history(history, prior);

        let state = states
            .entry(concept_id.clone())
            .or_insert_with(|| TrustState::untested(&members.person_id, &concept_id));
        state.level = scored.level;
        state.confidence = scored.confidence;
        state.modalities_tested = scored.modalities_tested.clone();
        if scored.level == TrustLevel::Untested {
            state.inferred_from.clear();
            state.last_verified = None;
        } else {
            // A failure-only downgrade has no success timestamp; keep the
            // propagated anchor so the contested remainder still decays.
            state.last_verified = scored.last_verified.or(state.last_verified);
        }

        let signal = base_signal(
            event.result,
            scored.confidence.value(),
            scored.modalities_tested.len(),
        );
        propagate(
            &graph,
            &concept_id,
            &concept_id,
            signal,
            event.timestamp,
            &mut states,
            &members.person_id,
        );
    }

    let computed_at = Utc::now();
    let snapshots: Vec<TrustSnapshot> = members
        .concept_ids
        .iter()
        .map(|concept_id| TrustSnapshot {
            state: states
                .remove(concept_id)
                .unwrap_or_else(|| TrustState::untested(&members.person_id, concept_id)),
            derived_from_event_seq: latest_seq,
            stamp,
            computed_at,
        })
        .collect();

    let checkpoint = Checkpoint {
        scope_key: members.key.clone(),
        person_id: members.person_id.clone(),
        event_seq: latest_seq,
        stamp,
        computed_at,
    };

    store.commit_projection(&checkpoint, &members.concept_ids, &snapshots)?;

    tracing::info!(
        scope = %members.key,
        concepts = members.concept_ids.len(),
        event_seq = latest_seq,
        "rebuilt scope projection"
    );
    Ok(snapshots)
}

/// Check freshness and rebuild only when the cache cannot be served.
/// Returns true when a rebuild happened.
pub fn ensure_fresh(store: &dyn ITrustStore, members: &ScopeMembers) -> TrustResult<bool> {
    let freshness = check_freshness(store, members)?;
    if freshness.fresh {
        return Ok(false);
    }
    tracing::debug!(
        scope = %members.key,
        reasons = ?freshness.reasons,
        "scope stale, rebuilding"
    );
    project_scope(store, members)?;
    Ok(true)
}

/// Edges with both endpoints inside the scope.
fn scope_edges(store: &dyn ITrustStore, members: &ScopeMembers) -> TrustResult<Vec<ConceptEdge>> {
    let mut edges = Vec::new();
    for concept_id in &members.concept_ids {
        for edge in store.edges_from(concept_id)? {
            if members.contains(&edge.to) {
                edges.push(edge);
            }
        }
    }
    Ok(edges)
}
