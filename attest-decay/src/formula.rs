use chrono::{DateTime, Utc};

use attest_core::config::DecayConfig;
use attest_core::constants::MS_PER_DAY;

use crate::half_life::effective_half_life;

/// Inputs to one decay computation. Pure data — the caller supplies both
/// clocks, so decay is never baked into stored state.
#[derive(Debug, Clone, Copy)]
pub struct DecayInput {
    /// Stored (undecayed) confidence. Clamped, never rejected.
    pub confidence: f64,
    /// When the evidence was last refreshed. None means there is no decay
    /// anchor, and confidence passes through unchanged.
    pub last_verified: Option<DateTime<Utc>>,
    pub as_of: DateTime<Utc>,
    /// Distinct modalities backing the state.
    pub modality_count: usize,
    /// Concepts this one is a prerequisite for.
    pub downstream_dependents: usize,
}

/// Exponential half-life decay:
///
/// ```text
/// decayed = confidence × 0.5^(daysSince / halfLife)
/// ```
///
/// Zero confidence stays zero; `as_of` at or before `last_verified` returns
/// confidence unchanged; the result is monotonically non-increasing in
/// `as_of` and never negative.
pub fn compute(config: &DecayConfig, input: &DecayInput) -> f64 {
    let confidence = input.confidence.clamp(0.0, 1.0);
    if confidence == 0.0 {
        return 0.0;
    }

    let last_verified = match input.last_verified {
        Some(t) => t,
        None => return confidence,
    };

    let elapsed_ms = (input.as_of - last_verified).num_milliseconds();
    if elapsed_ms <= 0 {
        return confidence;
    }

    let days_since = elapsed_ms as f64 / MS_PER_DAY;
    let half_life = effective_half_life(config, input.modality_count, input.downstream_dependents);

    confidence * 0.5_f64.powf(days_since / half_life)
}
