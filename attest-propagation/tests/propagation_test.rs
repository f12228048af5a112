use std::collections::HashMap;

use attest_core::events::VerificationResult;
use attest_core::graph::EdgeType;
use attest_core::trust::{TrustLevel, TrustState};
use attest_propagation::{base_signal, propagate, ScopeGraph, Signal, SignalKind};
use test_fixtures::{edge, t0};

const PERSON: &str = "ada";

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn chain(strength: f64, names: &[&str]) -> ScopeGraph {
    let edges: Vec<_> = names
        .windows(2)
        .map(|w| edge(w[0], w[1], EdgeType::Prerequisite, strength))
        .collect();
    ScopeGraph::build(&ids(names), &edges)
}

fn verified_source(states: &mut HashMap<String, TrustState>, id: &str, confidence: f64) {
    let mut state = TrustState::untested(PERSON, id);
    state.level = TrustLevel::Verified;
    state.confidence = confidence.into();
    state.last_verified = Some(t0());
    states.insert(id.to_string(), state);
}

// ── Rule 1: propagation can only infer, never verify ─────────────────────

#[test]
fn propagated_trust_is_never_verified() {
    let graph = chain(1.0, &["a", "b", "c", "d"]);
    let mut states = HashMap::new();
    verified_source(&mut states, "a", 0.9);

    propagate(
        &graph,
        "a",
        "a",
        base_signal(VerificationResult::Demonstrated, 0.9, 1),
        t0(),
        &mut states,
        PERSON,
    );

    for id in ["b", "c", "d"] {
        let state = &states[id];
        assert_ne!(state.level, TrustLevel::Verified, "{id} must not be verified");
        assert_eq!(state.level, TrustLevel::Inferred);
        assert_eq!(
            state.inferred_from.iter().collect::<Vec<_>>(),
            vec![&"a".to_string()],
            "{id} should trace back to the origin"
        );
    }
}

#[test]
fn success_never_downgrades_a_verified_target() {
    let graph = chain(1.0, &["a", "b", "c"]);
    let mut states = HashMap::new();
    verified_source(&mut states, "a", 0.9);
    verified_source(&mut states, "b", 0.6);

    let changed = propagate(
        &graph,
        "a",
        "a",
        base_signal(VerificationResult::Demonstrated, 0.9, 1),
        t0(),
        &mut states,
        PERSON,
    );

    assert_eq!(states["b"].level, TrustLevel::Verified);
    assert_eq!(states["b"].confidence.value(), 0.6);
    // A no-op at b halts the branch: c never hears about it.
    assert!(changed.is_empty());
    assert!(!states.contains_key("c"));
}

// ── Rule 2: geometric attenuation and the signal floor ───────────────────

#[test]
fn confidence_strictly_decreases_with_distance() {
    let graph = chain(1.0, &["a", "b", "c", "d"]);
    let mut states = HashMap::new();
    verified_source(&mut states, "a", 0.8);

    propagate(
        &graph,
        "a",
        "a",
        base_signal(VerificationResult::Demonstrated, 0.8, 1),
        t0(),
        &mut states,
        PERSON,
    );

    let b = states["b"].confidence.value();
    let c = states["c"].confidence.value();
    let d = states["d"].confidence.value();
    assert!((b - 0.8).abs() < 1e-9);
    assert!((c - 0.4).abs() < 1e-9);
    assert!((d - 0.2).abs() < 1e-9);
    assert!(b > c && c > d);
}

#[test]
fn signal_below_floor_stops_the_branch() {
    // 0.7 → 0.42 at depth 1 → 0.126 at depth 2 → 0.0378 at depth 3: cut.
    let graph = chain(0.6, &["a", "b", "c", "d"]);
    let mut states = HashMap::new();
    verified_source(&mut states, "a", 0.7);

    propagate(
        &graph,
        "a",
        "a",
        base_signal(VerificationResult::Demonstrated, 0.7, 1),
        t0(),
        &mut states,
        PERSON,
    );

    assert_eq!(states["b"].level, TrustLevel::Inferred);
    assert_eq!(states["c"].level, TrustLevel::Inferred);
    assert!(!states.contains_key("d"), "sub-floor signal must not land");
}

// ── Rules 3 & 4: base signal shapes ──────────────────────────────────────

#[test]
fn failure_signal_is_louder_than_success() {
    let success = base_signal(VerificationResult::Demonstrated, 0.6, 1);
    let failure = base_signal(VerificationResult::Failed, 0.6, 1);
    assert_eq!(success.kind, SignalKind::Success);
    assert_eq!(failure.kind, SignalKind::Failure);
    assert!(failure.magnitude > success.magnitude);
}

#[test]
fn partial_signal_is_half_strength_plus_bonus() {
    let partial = base_signal(VerificationResult::Partial, 0.8, 3);
    assert_eq!(partial.kind, SignalKind::Success);
    assert!((partial.magnitude - (0.4 + 0.2)).abs() < 1e-9);
}

// ── Rule 5: failure application ──────────────────────────────────────────

#[test]
fn failure_contests_a_verified_target() {
    let graph = chain(1.0, &["a", "b"]);
    let mut states = HashMap::new();
    verified_source(&mut states, "a", 0.4);
    verified_source(&mut states, "b", 0.8);

    propagate(
        &graph,
        "a",
        "a",
        Signal {
            kind: SignalKind::Failure,
            magnitude: 0.3,
        },
        t0(),
        &mut states,
        PERSON,
    );

    assert_eq!(states["b"].level, TrustLevel::Contested);
    assert!((states["b"].confidence.value() - 0.5).abs() < 1e-9);
}

#[test]
fn failure_drains_inferred_back_to_untested() {
    let graph = chain(1.0, &["a", "b"]);
    let mut states = HashMap::new();
    verified_source(&mut states, "a", 0.5);

    let mut inferred = TrustState::untested(PERSON, "b");
    inferred.level = TrustLevel::Inferred;
    inferred.confidence = 0.2.into();
    inferred.inferred_from.insert("a".to_string());
    inferred.last_verified = Some(t0());
    states.insert("b".to_string(), inferred);

    propagate(
        &graph,
        "a",
        "a",
        Signal {
            kind: SignalKind::Failure,
            magnitude: 0.9,
        },
        t0(),
        &mut states,
        PERSON,
    );

    let b = &states["b"];
    assert_eq!(b.level, TrustLevel::Untested);
    assert_eq!(b.confidence.value(), 0.0);
    assert!(b.inferred_from.is_empty());
}

#[test]
fn failure_leaves_untested_targets_alone() {
    let graph = chain(1.0, &["a", "b"]);
    let mut states = HashMap::new();
    verified_source(&mut states, "a", 0.5);

    let changed = propagate(
        &graph,
        "a",
        "a",
        Signal {
            kind: SignalKind::Failure,
            magnitude: 0.75,
        },
        t0(),
        &mut states,
        PERSON,
    );
    assert!(changed.is_empty());
    assert_eq!(states["b"].level, TrustLevel::Untested);
}

// ── Termination ──────────────────────────────────────────────────────────

#[test]
fn cycles_terminate() {
    let edges = vec![
        edge("x", "y", EdgeType::RelatedTo, 0.9),
        edge("y", "x", EdgeType::RelatedTo, 0.9),
    ];
    let graph = ScopeGraph::build(&ids(&["x", "y"]), &edges);
    let mut states = HashMap::new();
    verified_source(&mut states, "x", 0.9);

    let changed = propagate(
        &graph,
        "x",
        "x",
        base_signal(VerificationResult::Demonstrated, 0.9, 1),
        t0(),
        &mut states,
        PERSON,
    );

    assert_eq!(changed, vec!["y".to_string()]);
    assert_eq!(states["y"].level, TrustLevel::Inferred);
    // x itself is never revisited by its own ripple.
    assert_eq!(states["x"].level, TrustLevel::Verified);
}

#[test]
fn weaker_repeat_signal_is_a_no_op() {
    let graph = chain(1.0, &["a", "b", "c"]);
    let mut states = HashMap::new();
    verified_source(&mut states, "a", 0.8);

    propagate(
        &graph,
        "a",
        "a",
        base_signal(VerificationResult::Demonstrated, 0.8, 1),
        t0(),
        &mut states,
        PERSON,
    );
    let before_b = states["b"].confidence.value();
    let before_c = states["c"].confidence.value();

    // A weaker follow-up signal changes nothing and halts immediately.
    let changed = propagate(
        &graph,
        "a",
        "a",
        base_signal(VerificationResult::Partial, 0.4, 1),
        t0(),
        &mut states,
        PERSON,
    );
    assert!(changed.is_empty());
    assert_eq!(states["b"].confidence.value(), before_b);
    assert_eq!(states["c"].confidence.value(), before_c);
}
