use proptest::prelude::*;

use attest_core::events::{Modality, VerificationEvent, VerificationResult};
use attest_core::trust::TrustLevel;
use attest_scoring::score_history;
use test_fixtures::{days_after, verification};

fn arb_modality() -> impl Strategy<Value = Modality> {
    prop::sample::select(Modality::ALL.to_vec())
}

fn arb_result() -> impl Strategy<Value = VerificationResult> {
    prop_oneof![
        Just(VerificationResult::Demonstrated),
        Just(VerificationResult::Failed),
        Just(VerificationResult::Partial),
    ]
}

fn arb_history() -> impl Strategy<Value = Vec<VerificationEvent>> {
    prop::collection::vec((arb_modality(), arb_result()), 0..12).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (modality, result))| {
                verification("ada", "ownership", modality, result, days_after(i as i64))
            })
            .collect()
    })
}

// ── P-SCORE-01: contested iff both evidence classes coexist ──────────────

proptest! {
    #[test]
    fn contested_iff_success_and_failure(history in arb_history()) {
        let scored = score_history(&history, None);
        let has_success = history.iter().any(|e| e.result.is_success_class());
        let has_failure = history.iter().any(|e| e.result.is_failure_class());

        prop_assert_eq!(
            scored.level == TrustLevel::Contested,
            has_success && has_failure,
            "level {:?} vs success={} failure={}",
            scored.level, has_success, has_failure
        );
    }
}

// ── P-SCORE-02: confidence always bounded ────────────────────────────────

proptest! {
    #[test]
    fn confidence_bounded(history in arb_history()) {
        let scored = score_history(&history, None);
        let c = scored.confidence.value();
        prop_assert!((0.0..=1.0).contains(&c));
    }
}

// ── P-SCORE-03: success-only histories always verify ─────────────────────

proptest! {
    #[test]
    fn success_only_is_verified(
        modalities in prop::collection::vec(arb_modality(), 1..8),
    ) {
        let history: Vec<_> = modalities
            .into_iter()
            .enumerate()
            .map(|(i, m)| {
                verification(
                    "ada",
                    "ownership",
                    m,
                    VerificationResult::Demonstrated,
                    days_after(i as i64),
                )
            })
            .collect();
        let scored = score_history(&history, None);
        prop_assert_eq!(scored.level, TrustLevel::Verified);
        prop_assert!(scored.confidence.value() > 0.0);
    }
}
