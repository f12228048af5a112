use attest_core::config::DecayConfig;

/// Effective half-life in days for a trust state.
///
/// ```text
/// halfLife = base × (1 + factor·(modalities − 1)) + perDependent × dependents
/// ```
///
/// Cross-modality evidence decays slower, and foundational concepts (those
/// that are prerequisites for others) decay slower still. Capped at the
/// configured ceiling.
pub fn effective_half_life(
    config: &DecayConfig,
    modality_count: usize,
    downstream_dependents: usize,
) -> f64 {
    let extra_modalities = modality_count.saturating_sub(1) as f64;
    let modality_extended =
        config.base_half_life_days * (1.0 + config.modality_half_life_factor * extra_modalities);
    let structural = config.dependent_half_life_days * downstream_dependents as f64;

    (modality_extended + structural).min(config.max_half_life_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_modality_no_dependents_is_base() {
        let cfg = DecayConfig::default();
        assert_eq!(effective_half_life(&cfg, 1, 0), 30.0);
        // Zero modalities (inferred-only state) never shortens below base.
        assert_eq!(effective_half_life(&cfg, 0, 0), 30.0);
    }

    #[test]
    fn modalities_and_dependents_extend() {
        let cfg = DecayConfig::default();
        assert_eq!(effective_half_life(&cfg, 3, 0), 60.0);
        assert_eq!(effective_half_life(&cfg, 1, 4), 50.0);
    }

    #[test]
    fn capped_at_ceiling() {
        let cfg = DecayConfig::default();
        assert_eq!(effective_half_life(&cfg, 12, 1000), 365.0);
    }
}
