//! Shared test builders: concepts, edges, events, and pre-seeded graphs
//! used by integration tests across the workspace.

use chrono::{DateTime, Duration, TimeZone, Utc};

use attest_core::errors::TrustResult;
use attest_core::events::{EventSource, Modality, VerificationEvent, VerificationResult};
use attest_core::graph::{ConceptEdge, ConceptNode, EdgeType};
use attest_core::traits::ITrustStore;

/// A fixed, deterministic base instant for tests that care about decay.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// `t0` plus a number of days.
pub fn days_after(days: i64) -> DateTime<Utc> {
    t0() + Duration::days(days)
}

pub fn concept(id: &str) -> ConceptNode {
    ConceptNode::new(id, id, &format!("test concept {id}"))
}

pub fn edge(from: &str, to: &str, edge_type: EdgeType, strength: f64) -> ConceptEdge {
    ConceptEdge::new(from, to, edge_type, strength)
}

pub fn verification(
    person: &str,
    concept: &str,
    modality: Modality,
    result: VerificationResult,
    at: DateTime<Utc>,
) -> VerificationEvent {
    VerificationEvent::new(
        person,
        concept,
        modality,
        result,
        "fixture",
        EventSource::Internal,
        at,
    )
}

/// Seed a prerequisite chain `a -> b -> c` (strength 0.6 each) plus an
/// isolated concept `island`.
pub fn seed_chain(store: &dyn ITrustStore) -> TrustResult<()> {
    for id in ["a", "b", "c", "island"] {
        store.upsert_concept(&concept(id))?;
    }
    store.upsert_edge(&edge("a", "b", EdgeType::Prerequisite, 0.6))?;
    store.upsert_edge(&edge("b", "c", EdgeType::Prerequisite, 0.6))?;
    Ok(())
}

/// Seed a strong four-node chain `a -> b -> c -> d` with full-strength
/// edges, so attenuation alone shapes the gradient.
pub fn seed_strong_chain(store: &dyn ITrustStore) -> TrustResult<()> {
    for id in ["a", "b", "c", "d"] {
        store.upsert_concept(&concept(id))?;
    }
    store.upsert_edge(&edge("a", "b", EdgeType::Prerequisite, 1.0))?;
    store.upsert_edge(&edge("b", "c", EdgeType::Prerequisite, 1.0))?;
    store.upsert_edge(&edge("c", "d", EdgeType::Prerequisite, 1.0))?;
    Ok(())
}

/// Seed a two-node cycle `x <-> y` for cycle-termination tests.
pub fn seed_cycle(store: &dyn ITrustStore) -> TrustResult<()> {
    for id in ["x", "y"] {
        store.upsert_concept(&concept(id))?;
    }
    store.upsert_edge(&edge("x", "y", EdgeType::RelatedTo, 0.9))?;
    store.upsert_edge(&edge("y", "x", EdgeType::RelatedTo, 0.9))?;
    Ok(())
}
