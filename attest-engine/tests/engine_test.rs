use attest_core::config::AttestConfig;
use attest_core::errors::TrustError;
use attest_core::events::{EventKind, EventSource, Modality, VerificationResult};
use attest_core::graph::EdgeType;
use attest_core::trust::TrustLevel;
use attest_engine::{RecordClaim, RecordVerification, RetractEvent, TrustEngine};
use test_fixtures::{concept, days_after, edge, seed_chain, t0};

const PERSON: &str = "ada";

fn engine() -> TrustEngine {
    // RUST_LOG=debug surfaces projector replay traces when a test fails.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    let engine = TrustEngine::open_in_memory(AttestConfig::default()).unwrap();
    seed_chain(engine.store()).unwrap();
    engine
}

fn verify_input(
    concept: &str,
    modality: Modality,
    result: VerificationResult,
    days: i64,
) -> RecordVerification {
    RecordVerification {
        person_id: PERSON.to_string(),
        concept_id: concept.to_string(),
        modality,
        result,
        context: "engine test".to_string(),
        source: EventSource::Internal,
        timestamp: Some(days_after(days)),
    }
}

// ── Recording ────────────────────────────────────────────────────────────

#[test]
fn recording_a_demonstration_verifies_the_concept() {
    let engine = engine();
    let state = engine
        .record_verification(verify_input(
            "a",
            Modality::GrillTransfer,
            VerificationResult::Demonstrated,
            0,
        ))
        .unwrap();

    assert_eq!(state.level, TrustLevel::Verified);
    assert!((state.confidence.value() - 0.70).abs() < 1e-9);
    assert_eq!(state.last_verified, Some(t0()));
    // Decay at the recording instant is the identity.
    assert_eq!(state.decayed_confidence, Some(0.70));
    // No claim yet: the gap is null.
    assert!(state.calibration_gap.is_none());
}

#[test]
fn verification_ripples_into_the_component() {
    let engine = engine();
    engine
        .record_verification(verify_input(
            "a",
            Modality::GrillTransfer,
            VerificationResult::Demonstrated,
            0,
        ))
        .unwrap();

    let b = engine.trust_state(PERSON, "b", Some(t0())).unwrap().unwrap();
    assert_eq!(b.level, TrustLevel::Inferred);
    assert!((b.confidence.value() - 0.42).abs() < 1e-9);
    assert_eq!(b.inferred_from.iter().collect::<Vec<_>>(), vec!["a"]);

    // The island is untouched and reads as untested.
    let island = engine.trust_state(PERSON, "island", Some(t0())).unwrap().unwrap();
    assert_eq!(island.level, TrustLevel::Untested);
}

#[test]
fn attenuation_orders_the_chain() {
    let engine = TrustEngine::open_in_memory(AttestConfig::default()).unwrap();
    test_fixtures::seed_strong_chain(engine.store()).unwrap();

    engine
        .record_verification(verify_input(
            "a",
            Modality::SandboxDebug,
            VerificationResult::Demonstrated,
            0,
        ))
        .unwrap();

    let b = engine.trust_state(PERSON, "b", Some(t0())).unwrap().unwrap();
    let c = engine.trust_state(PERSON, "c", Some(t0())).unwrap().unwrap();
    let d = engine.trust_state(PERSON, "d", Some(t0())).unwrap().unwrap();
    assert!(b.confidence.value() > c.confidence.value());
    assert!(c.confidence.value() > d.confidence.value());
    assert!((c.confidence.value() / b.confidence.value() - 0.5).abs() < 1e-9);
}

#[test]
fn second_modality_beats_repeat_verification() {
    let engine = engine();
    engine
        .record_verification(verify_input(
            "island",
            Modality::GrillApply,
            VerificationResult::Demonstrated,
            0,
        ))
        .unwrap();
    let repeat = engine
        .record_verification(verify_input(
            "island",
            Modality::GrillApply,
            VerificationResult::Demonstrated,
            1,
        ))
        .unwrap();
    let cross = engine
        .record_verification(verify_input(
            "island",
            Modality::SandboxTrace,
            VerificationResult::Demonstrated,
            2,
        ))
        .unwrap();

    assert!(cross.confidence.value() > repeat.confidence.value());
}

#[test]
fn unknown_concept_is_rejected_at_the_boundary() {
    let engine = engine();
    let err = engine
        .record_verification(verify_input(
            "phantom",
            Modality::GrillRecall,
            VerificationResult::Demonstrated,
            0,
        ))
        .unwrap_err();
    assert!(matches!(err, TrustError::UnknownConcept { .. }));
}

// ── Claims ───────────────────────────────────────────────────────────────

#[test]
fn claim_gap_measures_against_decayed_evidence() {
    let engine = engine();
    engine
        .record_verification(verify_input(
            "island",
            Modality::GrillTransfer,
            VerificationResult::Demonstrated,
            0,
        ))
        .unwrap();

    let outcome = engine
        .record_claim(RecordClaim {
            person_id: PERSON.to_string(),
            concept_id: "island".to_string(),
            self_reported_confidence: 0.9,
            context: "feeling good".to_string(),
            timestamp: Some(t0()),
        })
        .unwrap();

    assert!(outcome.recorded);
    let gap = outcome.calibration_gap.unwrap();
    assert!((gap - 0.2).abs() < 1e-9, "expected +0.2 overclaim, got {gap}");

    let state = outcome.trust_state.unwrap();
    assert_eq!(state.calibration_gap, Some(gap));
}

#[test]
fn queries_surface_the_latest_claim_gap() {
    let engine = engine();
    engine
        .record_verification(verify_input(
            "island",
            Modality::IntegratedUse,
            VerificationResult::Demonstrated,
            0,
        ))
        .unwrap();
    engine
        .record_claim(RecordClaim {
            person_id: PERSON.to_string(),
            concept_id: "island".to_string(),
            self_reported_confidence: 0.5,
            context: String::new(),
            timestamp: Some(t0()),
        })
        .unwrap();

    let state = engine.trust_state(PERSON, "island", Some(t0())).unwrap().unwrap();
    let gap = state.calibration_gap.unwrap();
    assert!((gap - (0.5 - 0.95)).abs() < 1e-9);
}

// ── Retraction ───────────────────────────────────────────────────────────

#[test]
fn retracting_the_sole_event_returns_untested() {
    let engine = engine();
    engine
        .record_verification(verify_input(
            "a",
            Modality::GrillTransfer,
            VerificationResult::Demonstrated,
            0,
        ))
        .unwrap();
    let event_id = engine
        .store()
        .verification_history(PERSON, "a")
        .unwrap()
        .pop()
        .unwrap()
        .id;

    let outcome = engine
        .retract_event(RetractEvent {
            event_id,
            event_kind: EventKind::Verification,
            reason: "proctoring issue".to_string(),
            retracted_by: "auditor".to_string(),
            timestamp: None,
        })
        .unwrap();

    assert!(outcome.retracted);
    // Source plus the downstream inferences it fed.
    assert!(outcome.trust_states_affected >= 2);

    let a = engine.trust_state(PERSON, "a", Some(t0())).unwrap().unwrap();
    assert_eq!(a.level, TrustLevel::Untested);
    assert_eq!(a.confidence.value(), 0.0);
    assert!(engine.store().verification_history(PERSON, "a").unwrap().is_empty());
}

#[test]
fn retracting_a_failure_can_restore_verified() {
    let engine = engine();
    engine
        .record_verification(verify_input(
            "island",
            Modality::SandboxExecute,
            VerificationResult::Demonstrated,
            0,
        ))
        .unwrap();
    let contested = engine
        .record_verification(verify_input(
            "island",
            Modality::GrillApply,
            VerificationResult::Failed,
            1,
        ))
        .unwrap();
    assert_eq!(contested.level, TrustLevel::Contested);

    let failed_id = engine
        .store()
        .verification_history(PERSON, "island")
        .unwrap()
        .into_iter()
        .find(|e| e.result == VerificationResult::Failed)
        .unwrap()
        .id;

    let outcome = engine
        .retract_event(RetractEvent {
            event_id: failed_id,
            event_kind: EventKind::Verification,
            reason: "ambiguous question".to_string(),
            retracted_by: "auditor".to_string(),
            timestamp: None,
        })
        .unwrap();
    assert!(outcome.retracted);

    let island = engine.trust_state(PERSON, "island", Some(days_after(1))).unwrap().unwrap();
    assert_eq!(island.level, TrustLevel::Verified);
}

#[test]
fn retracting_an_unknown_event_is_a_clean_noop() {
    let engine = engine();
    let outcome = engine
        .retract_event(RetractEvent {
            event_id: "no-such-event".to_string(),
            event_kind: EventKind::Verification,
            reason: "n/a".to_string(),
            retracted_by: "auditor".to_string(),
            timestamp: None,
        })
        .unwrap();
    assert!(!outcome.retracted);
    assert_eq!(outcome.trust_states_affected, 0);
}

#[test]
fn claim_retraction_never_moves_trust() {
    let engine = engine();
    engine
        .record_verification(verify_input(
            "island",
            Modality::SandboxExecute,
            VerificationResult::Demonstrated,
            0,
        ))
        .unwrap();
    let outcome = engine
        .record_claim(RecordClaim {
            person_id: PERSON.to_string(),
            concept_id: "island".to_string(),
            self_reported_confidence: 0.99,
            context: String::new(),
            timestamp: Some(t0()),
        })
        .unwrap();
    assert!(outcome.recorded);

    let claim_id = engine
        .store()
        .latest_claim(PERSON, "island")
        .unwrap()
        .unwrap()
        .id;
    let before = engine.trust_state(PERSON, "island", Some(t0())).unwrap().unwrap();

    let retraction = engine
        .retract_event(RetractEvent {
            event_id: claim_id,
            event_kind: EventKind::Claim,
            reason: "overclaimed".to_string(),
            retracted_by: PERSON.to_string(),
            timestamp: None,
        })
        .unwrap();
    assert!(retraction.retracted);
    assert_eq!(retraction.trust_states_affected, 0);

    let after = engine.trust_state(PERSON, "island", Some(t0())).unwrap().unwrap();
    assert_eq!(after.level, before.level);
    assert_eq!(after.confidence, before.confidence);
    // With the claim gone the gap disappears from reads.
    assert!(after.calibration_gap.is_none());
}

// ── Reads, freshness, graph changes ──────────────────────────────────────

#[test]
fn unknown_concept_reads_as_none() {
    let engine = engine();
    assert!(engine.trust_state(PERSON, "phantom", None).unwrap().is_none());
}

#[test]
fn decay_is_applied_at_read_time_only() {
    let engine = engine();
    engine
        .record_verification(verify_input(
            "island",
            Modality::SandboxDebug,
            VerificationResult::Demonstrated,
            0,
        ))
        .unwrap();

    let fresh = engine.trust_state(PERSON, "island", Some(t0())).unwrap().unwrap();
    let aged = engine
        .trust_state(PERSON, "island", Some(days_after(30)))
        .unwrap()
        .unwrap();

    // Stored confidence never changes; only the decayed view does.
    assert_eq!(fresh.confidence, aged.confidence);
    let fresh_view = fresh.decayed_confidence.unwrap();
    let aged_view = aged.decayed_confidence.unwrap();
    assert!((fresh_view - 0.8).abs() < 1e-9);
    assert!((aged_view - 0.4).abs() < 0.004);
}

#[test]
fn domain_pack_changes_invalidate_and_heal() {
    let engine = engine();
    engine
        .record_verification(verify_input(
            "a",
            Modality::GrillTransfer,
            VerificationResult::Demonstrated,
            0,
        ))
        .unwrap();

    // Extend the graph below b; the bump marks every scope stale.
    engine
        .load_domain_pack(
            &[concept("d")],
            &[edge("b", "d", EdgeType::Prerequisite, 0.8)],
        )
        .unwrap();
    assert!(!engine.scope_freshness(PERSON, "a").unwrap().fresh);

    // The next read self-heals and the new concept picks up inference.
    let d = engine.trust_state(PERSON, "d", Some(t0())).unwrap().unwrap();
    assert_eq!(d.level, TrustLevel::Inferred);
    assert!(d.confidence.value() > 0.0);
    assert!(engine.scope_freshness(PERSON, "a").unwrap().fresh);
}

#[test]
fn person_trust_reads_every_cached_state() {
    let engine = engine();
    engine
        .record_verification(verify_input(
            "a",
            Modality::GrillTransfer,
            VerificationResult::Demonstrated,
            0,
        ))
        .unwrap();

    let states = engine.person_trust(PERSON, Some(t0())).unwrap();
    // The projected component wrote rows for a, b, and c.
    assert_eq!(states.len(), 3);
    assert!(states.iter().all(|s| s.decayed_confidence.is_some()));
}

#[test]
fn calibrate_round_trips_through_the_engine() {
    let engine = engine();
    let report = engine.calibrate(PERSON, Some(t0())).unwrap();
    assert_eq!(report.recommendation, "no trust data");
}
