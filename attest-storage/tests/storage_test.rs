use chrono::Utc;

use attest_core::events::{ClaimEvent, Modality, VerificationResult};
use attest_core::graph::EdgeType;
use attest_core::models::Checkpoint;
use attest_core::traits::ITrustStore;
use attest_core::trust::{TrustLevel, TrustSnapshot, TrustState, VersionStamp};
use attest_storage::StorageEngine;
use test_fixtures::{concept, days_after, edge, seed_chain, t0, verification};

const PERSON: &str = "ada";

fn open_seeded() -> StorageEngine {
    let store = StorageEngine::open_in_memory().unwrap();
    seed_chain(&store).unwrap();
    store
}

// ── Migrations ───────────────────────────────────────────────────────────

#[test]
fn migrations_are_idempotent_across_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("attest.db");

    let store = StorageEngine::open(&path).unwrap();
    store.upsert_concept(&concept("a")).unwrap();
    drop(store);

    // Second open re-runs the migration gate without error or data loss.
    let store = StorageEngine::open(&path).unwrap();
    assert!(store.concept_exists("a").unwrap());
}

// ── Graph ops ────────────────────────────────────────────────────────────

#[test]
fn adjacency_and_dependent_count() {
    let store = open_seeded();

    let from_a = store.edges_from("a").unwrap();
    assert_eq!(from_a.len(), 1);
    assert_eq!(from_a[0].to, "b");

    let into_b = store.edges_to("b").unwrap();
    assert_eq!(into_b.len(), 1);
    assert_eq!(into_b[0].from, "a");

    assert_eq!(store.downstream_dependent_count("a").unwrap(), 1);
    assert_eq!(store.downstream_dependent_count("island").unwrap(), 0);
}

#[test]
fn edge_upsert_updates_strength_in_place() {
    let store = open_seeded();
    store
        .upsert_edge(&edge("a", "b", EdgeType::Prerequisite, 0.9))
        .unwrap();
    let edges = store.edges_from("a").unwrap();
    assert_eq!(edges.len(), 1);
    assert!((edges[0].inference_strength - 0.9).abs() < 1e-9);
}

// ── Event log ────────────────────────────────────────────────────────────

#[test]
fn append_assigns_monotone_sequence() {
    let store = open_seeded();
    let s1 = store
        .append_verification(&verification(
            PERSON,
            "a",
            Modality::GrillRecall,
            VerificationResult::Demonstrated,
            t0(),
        ))
        .unwrap();
    let s2 = store
        .append_verification(&verification(
            PERSON,
            "b",
            Modality::GrillApply,
            VerificationResult::Failed,
            days_after(1),
        ))
        .unwrap();
    assert!(s2 > s1);
    assert_eq!(store.latest_event_seq(PERSON, &["a".into(), "b".into()]).unwrap(), s2);
}

#[test]
fn history_is_replay_ordered_not_insert_ordered() {
    let store = open_seeded();
    // Insert the later event first.
    store
        .append_verification(&verification(
            PERSON,
            "a",
            Modality::GrillApply,
            VerificationResult::Failed,
            days_after(5),
        ))
        .unwrap();
    store
        .append_verification(&verification(
            PERSON,
            "a",
            Modality::GrillRecall,
            VerificationResult::Demonstrated,
            t0(),
        ))
        .unwrap();

    let history = store.verification_history(PERSON, "a").unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].timestamp, t0());
    assert_eq!(history[1].timestamp, days_after(5));
}

#[test]
fn scope_history_spans_concepts_and_skips_other_people() {
    let store = open_seeded();
    store
        .append_verification(&verification(
            PERSON,
            "a",
            Modality::GrillRecall,
            VerificationResult::Demonstrated,
            t0(),
        ))
        .unwrap();
    store
        .append_verification(&verification(
            "someone-else",
            "a",
            Modality::GrillRecall,
            VerificationResult::Demonstrated,
            t0(),
        ))
        .unwrap();
    store
        .append_verification(&verification(
            PERSON,
            "b",
            Modality::SandboxTrace,
            VerificationResult::Partial,
            days_after(1),
        ))
        .unwrap();

    let scope = store
        .scope_verification_history(PERSON, &["a".into(), "b".into(), "c".into()])
        .unwrap();
    assert_eq!(scope.len(), 2);
    assert!(scope.iter().all(|e| e.person_id == PERSON));
}

// ── Retraction ───────────────────────────────────────────────────────────

#[test]
fn retraction_flags_and_hides_but_never_deletes() {
    let store = open_seeded();
    let event = verification(
        PERSON,
        "a",
        Modality::GrillRecall,
        VerificationResult::Demonstrated,
        t0(),
    );
    store.append_verification(&event).unwrap();

    let first = store
        .mark_verification_retracted(&event.id, "mistake", "auditor", Utc::now())
        .unwrap();
    assert!(first);

    // Hidden from history, still readable by id with the flag set.
    assert!(store.verification_history(PERSON, "a").unwrap().is_empty());
    let fetched = store.get_verification(&event.id).unwrap().unwrap();
    assert!(fetched.retracted);

    // The audit trail records who and why.
    let audit = store.retraction_audit(&event.id).unwrap();
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0], ("verification".to_string(), "mistake".to_string(), "auditor".to_string()));

    // Second retraction is a no-op.
    let second = store
        .mark_verification_retracted(&event.id, "again", "auditor", Utc::now())
        .unwrap();
    assert!(!second);
}

#[test]
fn retracting_unknown_event_is_a_noop() {
    let store = open_seeded();
    let flipped = store
        .mark_verification_retracted("no-such-id", "why", "auditor", Utc::now())
        .unwrap();
    assert!(!flipped);
}

// ── Claims ───────────────────────────────────────────────────────────────

#[test]
fn latest_claim_ignores_retracted_ones() {
    let store = open_seeded();
    let early = ClaimEvent::new(PERSON, "a", 0.4, "early", t0());
    let late = ClaimEvent::new(PERSON, "a", 0.9, "late", days_after(2));
    store.append_claim(&early).unwrap();
    store.append_claim(&late).unwrap();

    let latest = store.latest_claim(PERSON, "a").unwrap().unwrap();
    assert_eq!(latest.id, late.id);

    store
        .mark_claim_retracted(&late.id, "overclaimed", "ada", Utc::now())
        .unwrap();
    let latest = store.latest_claim(PERSON, "a").unwrap().unwrap();
    assert_eq!(latest.id, early.id);
}

// ── Snapshots, checkpoint, jobs: the atomic rewrite ──────────────────────

fn snapshot_for(concept_id: &str, level: TrustLevel, seq: i64, stamp: VersionStamp) -> TrustSnapshot {
    let mut state = TrustState::untested(PERSON, concept_id);
    state.level = level;
    if level != TrustLevel::Untested {
        state.confidence = 0.5.into();
        state.last_verified = Some(t0());
    }
    TrustSnapshot {
        state,
        derived_from_event_seq: seq,
        stamp,
        computed_at: t0(),
    }
}

#[test]
fn commit_projection_rewrites_scope_atomically() {
    let store = open_seeded();
    let stamp = store.version_stamp().unwrap();
    let members: Vec<String> = vec!["a".into(), "b".into(), "c".into()];

    let job = store.enqueue_projection_job("scope-1", PERSON).unwrap();
    assert!(job > 0);
    let pending = store.pending_jobs("scope-1").unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].status, attest_core::models::JobStatus::Pending);

    let checkpoint = Checkpoint {
        scope_key: "scope-1".to_string(),
        person_id: PERSON.to_string(),
        event_seq: 7,
        stamp,
        computed_at: t0(),
    };
    let snapshots = vec![
        snapshot_for("a", TrustLevel::Verified, 7, stamp),
        snapshot_for("b", TrustLevel::Inferred, 7, stamp),
        snapshot_for("c", TrustLevel::Untested, 7, stamp),
    ];
    store.commit_projection(&checkpoint, &members, &snapshots).unwrap();

    assert!(store.pending_jobs("scope-1").unwrap().is_empty());
    let restored = store.get_checkpoint("scope-1").unwrap().unwrap();
    assert_eq!(restored.event_seq, 7);
    assert_eq!(restored.stamp, stamp);

    let rows = store.snapshots_for(PERSON, &members).unwrap();
    assert_eq!(rows.len(), 3);

    // A second commit fully replaces the previous scope image.
    let replacement = vec![snapshot_for("a", TrustLevel::Contested, 9, stamp)];
    let checkpoint = Checkpoint {
        event_seq: 9,
        ..checkpoint
    };
    store.commit_projection(&checkpoint, &members, &replacement).unwrap();

    let rows = store.snapshots_for(PERSON, &members).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].state.level, TrustLevel::Contested);
}

#[test]
fn snapshot_round_trips_set_fields() {
    let store = open_seeded();
    let stamp = store.version_stamp().unwrap();

    let mut state = TrustState::untested(PERSON, "b");
    state.level = TrustLevel::Inferred;
    state.confidence = 0.42.into();
    state.last_verified = Some(t0());
    state.inferred_from.insert("a".to_string());
    state.modalities_tested.insert(Modality::GrillTransfer);
    state.modalities_tested.insert(Modality::SandboxDebug);

    let checkpoint = Checkpoint {
        scope_key: "scope-b".to_string(),
        person_id: PERSON.to_string(),
        event_seq: 3,
        stamp,
        computed_at: t0(),
    };
    store
        .commit_projection(
            &checkpoint,
            &["b".to_string()],
            &[TrustSnapshot {
                state: state.clone(),
                derived_from_event_seq: 3,
                stamp,
                computed_at: t0(),
            }],
        )
        .unwrap();

    let restored = store.get_snapshot(PERSON, "b").unwrap().unwrap();
    assert_eq!(restored.state.level, TrustLevel::Inferred);
    assert_eq!(restored.state.inferred_from, state.inferred_from);
    assert_eq!(restored.state.modalities_tested, state.modalities_tested);
    assert_eq!(restored.derived_from_event_seq, 3);
}

// ── Versions ─────────────────────────────────────────────────────────────

#[test]
fn version_bumps_are_independent() {
    let store = open_seeded();
    let before = store.version_stamp().unwrap();

    assert_eq!(store.bump_graph_version().unwrap(), before.graph_version + 1);
    assert_eq!(store.bump_model_version().unwrap(), before.model_version + 1);

    let after = store.version_stamp().unwrap();
    assert_eq!(after.graph_version, before.graph_version + 1);
    assert_eq!(after.model_version, before.model_version + 1);
    assert_eq!(after.taxonomy_version, before.taxonomy_version);
}
