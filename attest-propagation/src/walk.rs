use std::collections::{HashMap, HashSet, VecDeque};

use chrono::{DateTime, Utc};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use attest_core::constants::{
    HOP_ATTENUATION, MAX_TRAVERSAL_DEPTH, MIN_PROPAGATION_SIGNAL, MIN_STATE_DELTA,
};
use attest_core::trust::{Confidence, TrustLevel, TrustState};

use crate::graph::ScopeGraph;
use crate::signal::{Signal, SignalKind};

/// One pending hop in the walk.
struct Hop {
    target: NodeIndex,
    signal: Signal,
    depth: usize,
}

/// Propagate one source signal across the scope, mutating the shared
/// accumulator of per-concept states.
///
/// Iterative work-queue BFS over an owned map — no recursion, no aliasing.
/// A branch ends when the attenuated signal drops below the floor, when a
/// cycle would revisit a concept, or when applying the signal changes
/// nothing (a no-op downstream would change nothing either).
///
/// Returns the ids of concepts whose state actually changed.
pub fn propagate(
    graph: &ScopeGraph,
    source_id: &str,
    origin_id: &str,
    signal: Signal,
    event_timestamp: DateTime<Utc>,
    states: &mut HashMap<String, TrustState>,
    person_id: &str,
) -> Vec<String> {
    let mut changed = Vec::new();

    let source = match graph.node(source_id) {
        Some(idx) => idx,
        None => return changed,
    };

    let mut visited: HashSet<NodeIndex> = HashSet::new();
    visited.insert(source);

    let mut queue: VecDeque<Hop> = VecDeque::new();
    enqueue_neighbors(graph, source, signal, 1, &mut visited, &mut queue);

    while let Some(hop) = queue.pop_front() {
        if hop.signal.magnitude < MIN_PROPAGATION_SIGNAL || hop.depth > MAX_TRAVERSAL_DEPTH {
            continue;
        }

        let concept_id = graph.concept_id(hop.target).to_string();
        let state = states
            .entry(concept_id.clone())
            .or_insert_with(|| TrustState::untested(person_id, &concept_id));

        let did_change = match hop.signal.kind {
            SignalKind::Success => apply_success(state, hop.signal.magnitude, origin_id, event_timestamp),
            SignalKind::Failure => apply_failure(state, hop.signal.magnitude),
        };

        if !did_change {
            continue;
        }
        changed.push(concept_id);

        enqueue_neighbors(graph, hop.target, hop.signal, hop.depth + 1, &mut visited, &mut queue);
    }

    if !changed.is_empty() {
        tracing::debug!(
            source = source_id,
            reached = changed.len(),
            "propagated signal across scope"
        );
    }
    changed
}

/// Push every unvisited outgoing neighbor with the attenuated signal.
/// Attenuation: edge strength always, plus the geometric hop factor for
/// every hop past the first.
fn enqueue_neighbors(
    graph: &ScopeGraph,
    from: NodeIndex,
    signal: Signal,
    depth: usize,
    visited: &mut HashSet<NodeIndex>,
    queue: &mut VecDeque<Hop>,
) {
    for edge in graph.graph.edges_directed(from, Direction::Outgoing) {
        let target = edge.target();
        if visited.contains(&target) {
            continue;
        }
        visited.insert(target);

        let weight = edge.weight();
        let hop_factor = if depth > 1 { HOP_ATTENUATION } else { 1.0 };
        queue.push_back(Hop {
            target,
            signal: Signal {
                kind: signal.kind,
                magnitude: signal.magnitude * weight.inference_strength * hop_factor,
            },
            depth,
        });
    }
}

/// Success signals raise a target at most to Inferred and never move
/// directly-evidenced levels.
fn apply_success(
    state: &mut TrustState,
    magnitude: f64,
    origin_id: &str,
    event_timestamp: DateTime<Utc>,
) -> bool {
    match state.level {
        TrustLevel::Verified | TrustLevel::Contested => false,
        TrustLevel::Untested => {
            let new_confidence = Confidence::new(magnitude);
            if new_confidence.value() <= MIN_STATE_DELTA {
                return false;
            }
            state.level = TrustLevel::Inferred;
            state.confidence = new_confidence;
            state.inferred_from.insert(origin_id.to_string());
            state.last_verified = Some(event_timestamp);
            true
        }
        TrustLevel::Inferred => {
            let current = state.confidence.value();
            let new_confidence = Confidence::new(current.max(magnitude));
            if new_confidence.value() - current <= MIN_STATE_DELTA {
                return false;
            }
            state.confidence = new_confidence;
            state.inferred_from.insert(origin_id.to_string());
            state.last_verified = Some(event_timestamp);
            true
        }
    }
}

/// Failure signals drain confidence. A verified target that loses any
/// confidence becomes contested; an inferred target that hits zero reverts
/// to untested.
fn apply_failure(state: &mut TrustState, magnitude: f64) -> bool {
    let current = state.confidence.value();
    let drained = (current - magnitude).max(0.0);
    let delta = current - drained;

    match state.level {
        TrustLevel::Untested => false,
        TrustLevel::Verified => {
            if delta <= MIN_STATE_DELTA {
                return false;
            }
            state.level = TrustLevel::Contested;
            state.confidence = Confidence::new(drained);
            true
        }
        TrustLevel::Inferred => {
            if delta <= MIN_STATE_DELTA {
                return false;
            }
            state.confidence = Confidence::new(drained);
            if state.confidence.is_zero() {
                state.level = TrustLevel::Untested;
                state.inferred_from.clear();
                state.last_verified = None;
            }
            true
        }
        TrustLevel::Contested => {
            if delta <= MIN_STATE_DELTA {
                return false;
            }
            state.confidence = Confidence::new(drained);
            true
        }
    }
}
