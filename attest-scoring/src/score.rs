use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use attest_core::constants::{
    CROSS_MODALITY_BONUS, FAILURE_DOWNGRADE_CONFIDENCE, PARTIAL_PRESENCE_BUMP,
    PARTIAL_SUCCESS_WEIGHT,
};
use attest_core::events::Modality;
use attest_core::events::VerificationEvent;
use attest_core::trust::{Confidence, TrustLevel, TrustState};

use crate::partition::Partitioned;

/// Output of scoring one concept's direct history.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTrust {
    pub level: TrustLevel,
    pub confidence: Confidence,
    pub last_verified: Option<DateTime<Utc>>,
    pub modalities_tested: BTreeSet<Modality>,
}

impl ScoredTrust {
    fn untested() -> Self {
        Self {
            level: TrustLevel::Untested,
            confidence: Confidence::new(0.0),
            last_verified: None,
            modalities_tested: BTreeSet::new(),
        }
    }
}

/// Score a concept's non-retracted direct history.
///
/// `prior` is the state in effect before this history is applied — during
/// replay, the accumulator state, which may hold propagated (inferred)
/// trust. It only matters for the failure-without-success branch: failure
/// alone never proves negative knowledge on a blank concept, but it does
/// downgrade previously earned trust.
pub fn score_history(history: &[VerificationEvent], prior: Option<&TrustState>) -> ScoredTrust {
    let p = Partitioned::from_history(history);

    if p.is_empty() {
        return ScoredTrust::untested();
    }

    let last_verified = p
        .demonstrated
        .iter()
        .chain(p.partial.iter())
        .map(|e| e.timestamp)
        .max();
    let modalities_tested = p.all_modalities();

    if p.has_success_class() && p.has_failure_class() {
        return ScoredTrust {
            level: TrustLevel::Contested,
            confidence: contested_confidence(&p),
            last_verified,
            modalities_tested,
        };
    }

    if p.has_success_class() {
        return ScoredTrust {
            level: TrustLevel::Verified,
            confidence: verified_confidence(&p),
            last_verified,
            modalities_tested,
        };
    }

    // Failures only. A blank concept stays untested; previously earned
    // trust (verified, inferred, or already contested) drops to contested
    // at low confidence.
    let previously_trusted = prior
        .map(|s| s.level != TrustLevel::Untested)
        .unwrap_or(false);
    if previously_trusted {
        ScoredTrust {
            level: TrustLevel::Contested,
            confidence: Confidence::new(FAILURE_DOWNGRADE_CONFIDENCE),
            last_verified,
            modalities_tested,
        }
    } else {
        ScoredTrust {
            level: TrustLevel::Untested,
            confidence: Confidence::new(0.0),
            last_verified: None,
            modalities_tested,
        }
    }
}

/// Weighted success share plus the cross-modality bonus, capped at 1.0.
fn contested_confidence(p: &Partitioned<'_>) -> Confidence {
    let success_weight =
        p.demonstrated.len() as f64 + PARTIAL_SUCCESS_WEIGHT * p.partial.len() as f64;
    let failure_weight = p.failed.len() as f64;
    let base = success_weight / (success_weight + failure_weight);
    Confidence::new(base + demonstrated_bonus(p))
}

/// Max demonstrated modality strength plus bonuses, capped at 1.0.
/// With only partial evidence, half the strongest partial's strength.
fn verified_confidence(p: &Partitioned<'_>) -> Confidence {
    let max_demonstrated = p
        .demonstrated
        .iter()
        .map(|e| e.modality.strength())
        .fold(f64::MIN, f64::max);

    if p.demonstrated.is_empty() {
        let max_partial = p
            .partial
            .iter()
            .map(|e| e.modality.strength())
            .fold(f64::MIN, f64::max);
        return Confidence::new(PARTIAL_SUCCESS_WEIGHT * max_partial);
    }

    let partial_bump = if p.partial.is_empty() {
        0.0
    } else {
        PARTIAL_PRESENCE_BUMP
    };
    Confidence::new(max_demonstrated + demonstrated_bonus(p) + partial_bump)
}

/// `0.1` per additional distinct modality among demonstrated events.
fn demonstrated_bonus(p: &Partitioned<'_>) -> f64 {
    let distinct = p.demonstrated_modalities().len();
    if distinct > 1 {
        CROSS_MODALITY_BONUS * (distinct - 1) as f64
    } else {
        0.0
    }
}
