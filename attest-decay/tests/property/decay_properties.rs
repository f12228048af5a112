use chrono::Duration;
use proptest::prelude::*;

use attest_core::config::DecayConfig;
use attest_decay::{compute, effective_half_life, DecayInput};
use test_fixtures::t0;

fn input(confidence: f64, days: i64, modalities: usize, dependents: usize) -> DecayInput {
    DecayInput {
        confidence,
        last_verified: Some(t0()),
        as_of: t0() + Duration::days(days),
        modality_count: modalities,
        downstream_dependents: dependents,
    }
}

// ── P-DEC-01: bounded and never negative ─────────────────────────────────

proptest! {
    #[test]
    fn bounded_zero_to_one(
        confidence in -1.0f64..2.0,
        days in 0i64..2000,
        modalities in 0usize..12,
        dependents in 0usize..50,
    ) {
        let cfg = DecayConfig::default();
        let decayed = compute(&cfg, &input(confidence, days, modalities, dependents));
        prop_assert!((0.0..=1.0).contains(&decayed), "out of bounds: {decayed}");
    }
}

// ── P-DEC-02: monotonically non-increasing in as_of ──────────────────────

proptest! {
    #[test]
    fn monotonic_in_elapsed_time(
        confidence in 0.01f64..=1.0,
        modalities in 1usize..12,
        dependents in 0usize..20,
    ) {
        let cfg = DecayConfig::default();
        let mut prev = f64::INFINITY;
        for days in [0, 3, 10, 40, 120, 400] {
            let decayed = compute(&cfg, &input(confidence, days, modalities, dependents));
            prop_assert!(decayed <= prev + f64::EPSILON);
            prev = decayed;
        }
    }
}

// ── P-DEC-03: slowdowns only ever extend the half-life ───────────────────

proptest! {
    #[test]
    fn half_life_never_below_base(
        modalities in 0usize..12,
        dependents in 0usize..100,
    ) {
        let cfg = DecayConfig::default();
        let hl = effective_half_life(&cfg, modalities, dependents);
        prop_assert!(hl >= cfg.base_half_life_days);
        prop_assert!(hl <= cfg.max_half_life_days);
    }
}

// ── P-DEC-04: zero confidence is a fixed point ───────────────────────────

proptest! {
    #[test]
    fn zero_stays_zero(days in 0i64..2000) {
        let cfg = DecayConfig::default();
        prop_assert_eq!(compute(&cfg, &input(0.0, days, 1, 0)), 0.0);
    }
}
