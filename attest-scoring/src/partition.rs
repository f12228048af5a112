use std::collections::BTreeSet;

use attest_core::events::{Modality, VerificationEvent, VerificationResult};

/// A concept's direct history split by result class. Retracted events are
/// dropped here so every caller sees the same evidentiary view.
#[derive(Debug, Default)]
pub struct Partitioned<'a> {
    pub demonstrated: Vec<&'a VerificationEvent>,
    pub failed: Vec<&'a VerificationEvent>,
    pub partial: Vec<&'a VerificationEvent>,
}

impl<'a> Partitioned<'a> {
    pub fn from_history(history: &'a [VerificationEvent]) -> Self {
        let mut p = Self::default();
        for event in history.iter().filter(|e| !e.retracted) {
            match event.result {
                VerificationResult::Demonstrated => p.demonstrated.push(event),
                VerificationResult::Failed => p.failed.push(event),
                VerificationResult::Partial => p.partial.push(event),
            }
        }
        p
    }

    pub fn is_empty(&self) -> bool {
        self.demonstrated.is_empty() && self.failed.is_empty() && self.partial.is_empty()
    }

    pub fn has_success_class(&self) -> bool {
        !self.demonstrated.is_empty() || !self.partial.is_empty()
    }

    pub fn has_failure_class(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Distinct modalities among demonstrated events only — the set that
    /// earns the cross-modality bonus.
    pub fn demonstrated_modalities(&self) -> BTreeSet<Modality> {
        self.demonstrated.iter().map(|e| e.modality).collect()
    }

    /// Distinct modalities across the whole non-retracted history.
    pub fn all_modalities(&self) -> BTreeSet<Modality> {
        self.demonstrated
            .iter()
            .chain(self.failed.iter())
            .chain(self.partial.iter())
            .map(|e| e.modality)
            .collect()
    }
}
