use attest_core::constants::{CROSS_MODALITY_BONUS, FAILURE_SIGNAL_MULTIPLIER};
use attest_core::events::VerificationResult;

/// Whether a propagated signal confirms or disconfirms downstream trust.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Success,
    Failure,
}

/// A signal travelling outward from a verified concept. The magnitude is
/// attenuated per hop; the kind never changes along a path.
#[derive(Debug, Clone, Copy)]
pub struct Signal {
    pub kind: SignalKind,
    pub magnitude: f64,
}

/// Base signal at the source, before any attenuation.
///
/// Failure is deliberately louder than success: one failed check at a
/// prerequisite casts a wider shadow than one demonstration casts light.
pub fn base_signal(
    result: VerificationResult,
    source_confidence: f64,
    distinct_source_modalities: usize,
) -> Signal {
    let bonus = CROSS_MODALITY_BONUS * distinct_source_modalities.saturating_sub(1) as f64;
    match result {
        VerificationResult::Demonstrated => Signal {
            kind: SignalKind::Success,
            magnitude: source_confidence + bonus,
        },
        VerificationResult::Partial => Signal {
            kind: SignalKind::Success,
            magnitude: source_confidence * 0.5 + bonus,
        },
        VerificationResult::Failed => Signal {
            kind: SignalKind::Failure,
            magnitude: source_confidence * FAILURE_SIGNAL_MULTIPLIER,
        },
    }
}
