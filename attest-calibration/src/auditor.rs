//! CalibrationAuditor — walks all of a person's cached trust states and
//! their direct histories, accumulating the four metric families. Strictly
//! read-only: it never projects, never writes.

use chrono::{DateTime, Duration, Utc};

use attest_core::config::{AttestConfig, CalibrationConfig};
use attest_core::errors::TrustResult;
use attest_core::models::CalibrationReport;
use attest_core::traits::ITrustStore;
use attest_core::trust::{TrustLevel, TrustState};
use attest_decay::DecayEngine;

use crate::prediction::{self, PredictionOutcome};
use crate::recommendation::{self, MetricSummary};

pub struct CalibrationAuditor {
    config: CalibrationConfig,
    decay: DecayEngine,
}

impl CalibrationAuditor {
    pub fn new(config: &AttestConfig) -> Self {
        Self {
            config: config.calibration.clone(),
            decay: DecayEngine::new(config.decay.clone()),
        }
    }

    /// Audit one person's trust states as of the given instant.
    pub fn audit(
        &self,
        store: &dyn ITrustStore,
        person_id: &str,
        as_of: DateTime<Utc>,
    ) -> TrustResult<CalibrationReport> {
        let snapshots = store.person_snapshots(person_id)?;

        let mut concepts_audited = 0usize;
        let mut predictions = 0usize;
        let mut accurate = 0usize;
        let mut over_margins: Vec<f64> = Vec::new();
        let mut under_margins: Vec<f64> = Vec::new();
        let mut stale = 0usize;
        let mut claim_gaps: Vec<f64> = Vec::new();

        for snapshot in &snapshots {
            let state = &snapshot.state;
            let history = store.verification_history(person_id, &state.concept_id)?;

            // Untested rows with no direct history are placeholders the
            // projector writes for whole components; they carry nothing
            // to audit.
            if state.level == TrustLevel::Untested && history.is_empty() {
                continue;
            }
            concepts_audited += 1;

            if let Some(outcome) = prediction::evaluate(&history) {
                predictions += 1;
                match outcome {
                    PredictionOutcome::Accurate => accurate += 1,
                    PredictionOutcome::Overconfident { margin } => over_margins.push(margin),
                    PredictionOutcome::Underconfident { margin } => under_margins.push(margin),
                }
            }

            if self.is_stale(state, as_of) {
                stale += 1;
            }

            if let Some(claim) = store.latest_claim(person_id, &state.concept_id)? {
                let dependents = store.downstream_dependent_count(&state.concept_id)?;
                let decayed = self.decay.decayed_confidence(state, as_of, dependents);
                claim_gaps.push((claim.self_reported_confidence - decayed).abs());
            }
        }

        if concepts_audited == 0 {
            return Ok(CalibrationReport::empty(person_id, as_of));
        }

        let surprises = predictions - accurate;
        let prediction_accuracy = ratio(accurate, predictions);
        let surprise_rate = ratio(surprises, predictions);
        let overconfidence = mean(&over_margins);
        let underconfidence = mean(&under_margins);
        let stale_percentage = ratio(stale, concepts_audited);
        let claim_calibration = if claim_gaps.is_empty() {
            None
        } else {
            Some((1.0 - mean(&claim_gaps)).max(0.0))
        };

        let recommendation = recommendation::recommend(
            &self.config,
            &MetricSummary {
                concepts_audited,
                predictions_evaluated: predictions,
                surprise_rate,
                overconfidence,
                underconfidence,
                stale_percentage,
                claim_calibration,
            },
        );

        tracing::debug!(
            person = person_id,
            concepts = concepts_audited,
            predictions,
            recommendation,
            "calibration audit complete"
        );

        Ok(CalibrationReport {
            person_id: person_id.to_string(),
            as_of,
            prediction_accuracy,
            surprise_rate,
            overconfidence,
            underconfidence,
            stale_percentage,
            claim_calibration,
            concepts_audited,
            predictions_evaluated: predictions,
            recommendation: recommendation.to_string(),
        })
    }

    /// Stale: inferred with no direct verification at all, or direct
    /// evidence older than the configured window.
    fn is_stale(&self, state: &TrustState, as_of: DateTime<Utc>) -> bool {
        if state.level == TrustLevel::Inferred && state.modalities_tested.is_empty() {
            return true;
        }
        match state.last_verified {
            Some(last) => as_of - last > Duration::days(self.config.stale_after_days),
            None => false,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
