//! TrustEngine — the single entry point consumers talk to. Validates at
//! the boundary, serializes writers per scope, keeps the projection cache
//! self-healing, and applies decay only at read time.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use attest_core::config::AttestConfig;
use attest_core::errors::{TrustError, TrustResult};
use attest_core::events::{ClaimEvent, EventKind, VerificationEvent};
use attest_core::graph::{ConceptEdge, ConceptNode};
use attest_core::models::{ClaimOutcome, RetractionOutcome, ScopeFreshness};
use attest_core::models::CalibrationReport;
use attest_core::traits::ITrustStore;
use attest_core::trust::TrustState;
use attest_calibration::CalibrationAuditor;
use attest_decay::DecayEngine;
use attest_projection::{check_freshness, project_scope, resolve, Scope, ScopeMembers};
use attest_storage::StorageEngine;

use crate::inputs::{RecordClaim, RecordVerification, RetractEvent};
use crate::locks::{acquire, ScopeLocks};

pub struct TrustEngine {
    store: Arc<dyn ITrustStore>,
    config: AttestConfig,
    decay: DecayEngine,
    auditor: CalibrationAuditor,
    locks: ScopeLocks,
}

impl TrustEngine {
    pub fn new(store: Arc<dyn ITrustStore>, config: AttestConfig) -> Self {
        let decay = DecayEngine::new(config.decay.clone());
        let auditor = CalibrationAuditor::new(&config);
        Self {
            store,
            config,
            decay,
            auditor,
            locks: ScopeLocks::new(),
        }
    }

    /// Open with a file-backed SQLite store.
    pub fn open(path: &Path, config: AttestConfig) -> TrustResult<Self> {
        Ok(Self::new(Arc::new(StorageEngine::open(path)?), config))
    }

    /// Open with an in-memory store (for testing).
    pub fn open_in_memory(config: AttestConfig) -> TrustResult<Self> {
        Ok(Self::new(Arc::new(StorageEngine::open_in_memory()?), config))
    }

    pub fn config(&self) -> &AttestConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn ITrustStore {
        self.store.as_ref()
    }

    // --- Writes ---

    /// Append a verification event and recompute its component, returning
    /// the resulting trust state for the verified concept.
    pub fn record_verification(&self, input: RecordVerification) -> TrustResult<TrustState> {
        self.require_concept(&input.concept_id)?;
        let timestamp = input.timestamp.unwrap_or_else(Utc::now);
        let event = VerificationEvent::new(
            &input.person_id,
            &input.concept_id,
            input.modality,
            input.result,
            &input.context,
            input.source,
            timestamp,
        );

        let members = self.component_members(&input.person_id, &input.concept_id)?;
        let lock = self.locks.lock_for(&members.key);
        let _guard = acquire(&lock);

        self.store.append_verification(&event)?;
        self.store.enqueue_projection_job(&members.key, &input.person_id)?;
        project_scope(self.store.as_ref(), &members)?;

        tracing::info!(
            person = %input.person_id,
            concept = %input.concept_id,
            modality = %input.modality,
            result = %input.result,
            "recorded verification"
        );

        let state = self
            .read_state(&members, &input.concept_id, timestamp)?
            .unwrap_or_else(|| TrustState::untested(&input.person_id, &input.concept_id));
        Ok(state)
    }

    /// Record a self-reported confidence claim and measure it against the
    /// decayed evidence.
    pub fn record_claim(&self, input: RecordClaim) -> TrustResult<ClaimOutcome> {
        self.require_concept(&input.concept_id)?;
        let timestamp = input.timestamp.unwrap_or_else(Utc::now);
        let claim = ClaimEvent::new(
            &input.person_id,
            &input.concept_id,
            input.self_reported_confidence,
            &input.context,
            timestamp,
        );

        let members = self.component_members(&input.person_id, &input.concept_id)?;
        let lock = self.locks.lock_for(&members.key);
        let _guard = acquire(&lock);

        self.ensure_fresh_locked(&members)?;
        self.store.append_claim(&claim)?;

        let mut state = self.read_state(&members, &input.concept_id, timestamp)?;
        let calibration_gap = state.as_ref().and_then(|s| s.decayed_confidence).map(
            |decayed| claim.self_reported_confidence - decayed,
        );
        if let Some(s) = state.as_mut() {
            s.calibration_gap = calibration_gap;
        }

        Ok(ClaimOutcome {
            recorded: true,
            trust_state: state,
            calibration_gap,
        })
    }

    /// Retract an event. Verification retractions force a component
    /// recompute; claim retractions only thin the claim history. Unknown
    /// ids are a clean no-op.
    pub fn retract_event(&self, input: RetractEvent) -> TrustResult<RetractionOutcome> {
        let timestamp = input.timestamp.unwrap_or_else(Utc::now);
        match input.event_kind {
            EventKind::Verification => self.retract_verification(&input, timestamp),
            EventKind::Claim => self.retract_claim(&input, timestamp),
        }
    }

    fn retract_verification(
        &self,
        input: &RetractEvent,
        timestamp: DateTime<Utc>,
    ) -> TrustResult<RetractionOutcome> {
        let event = match self.store.get_verification(&input.event_id)? {
            Some(event) if !event.retracted => event,
            _ => return Ok(RetractionOutcome::noop()),
        };

        let members = self.component_members(&event.person_id, &event.concept_id)?;
        let lock = self.locks.lock_for(&members.key);
        let _guard = acquire(&lock);

        let retracted = self.store.mark_verification_retracted(
            &input.event_id,
            &input.reason,
            &input.retracted_by,
            timestamp,
        )?;
        if !retracted {
            return Ok(RetractionOutcome::noop());
        }

        let before = self.store.snapshots_for(&event.person_id, &members.concept_ids)?;
        self.store.enqueue_projection_job(&members.key, &event.person_id)?;
        let after = project_scope(self.store.as_ref(), &members)?;

        let trust_states_affected = after
            .iter()
            .filter(|snapshot| {
                before
                    .iter()
                    .find(|b| b.state.concept_id == snapshot.state.concept_id)
                    .map(|b| {
                        b.state.level != snapshot.state.level
                            || b.state.confidence != snapshot.state.confidence
                    })
                    .unwrap_or(true)
            })
            .count();

        tracing::info!(
            event = %input.event_id,
            affected = trust_states_affected,
            "retracted verification event"
        );

        Ok(RetractionOutcome {
            retracted: true,
            trust_states_affected,
        })
    }

    fn retract_claim(
        &self,
        input: &RetractEvent,
        timestamp: DateTime<Utc>,
    ) -> TrustResult<RetractionOutcome> {
        let retracted = self.store.mark_claim_retracted(
            &input.event_id,
            &input.reason,
            &input.retracted_by,
            timestamp,
        )?;
        // Claims never move trust levels, so nothing is recomputed.
        Ok(RetractionOutcome {
            retracted,
            trust_states_affected: 0,
        })
    }

    /// Load (or extend) a domain pack. Any structural change bumps the
    /// graph version, which invalidates every affected scope on next read.
    pub fn load_domain_pack(
        &self,
        concepts: &[ConceptNode],
        edges: &[ConceptEdge],
    ) -> TrustResult<u32> {
        for concept in concepts {
            self.store.upsert_concept(concept)?;
        }
        for edge in edges {
            self.require_concept(&edge.from)?;
            self.require_concept(&edge.to)?;
            self.store.upsert_edge(edge)?;
        }
        let version = self.store.bump_graph_version()?;
        tracing::info!(
            concepts = concepts.len(),
            edges = edges.len(),
            graph_version = version,
            "loaded domain pack"
        );
        Ok(version)
    }

    // --- Reads ---

    /// Current trust state for a pair, with decay and claim gap applied as
    /// of the given instant. Unknown concepts read as None.
    pub fn trust_state(
        &self,
        person_id: &str,
        concept_id: &str,
        as_of: Option<DateTime<Utc>>,
    ) -> TrustResult<Option<TrustState>> {
        if !self.store.concept_exists(concept_id)? {
            return Ok(None);
        }
        let as_of = as_of.unwrap_or_else(Utc::now);
        let members = self.component_members(person_id, concept_id)?;

        let lock = self.locks.lock_for(&members.key);
        let _guard = acquire(&lock);
        self.ensure_fresh_locked(&members)?;

        self.read_state(&members, concept_id, as_of)
    }

    /// Every cached trust state for a person, decay-decorated. Serves the
    /// cache as-is; per-scope freshness is the write paths' concern.
    pub fn person_trust(
        &self,
        person_id: &str,
        as_of: Option<DateTime<Utc>>,
    ) -> TrustResult<Vec<TrustState>> {
        let as_of = as_of.unwrap_or_else(Utc::now);
        let snapshots = self.store.person_snapshots(person_id)?;
        snapshots
            .into_iter()
            .map(|snapshot| self.decorate(snapshot.state, as_of))
            .collect()
    }

    /// Freshness diagnostics for the component around a concept.
    pub fn scope_freshness(
        &self,
        person_id: &str,
        concept_id: &str,
    ) -> TrustResult<ScopeFreshness> {
        let members = self.component_members(person_id, concept_id)?;
        check_freshness(self.store.as_ref(), &members)
    }

    /// Calibration audit for a person.
    pub fn calibrate(
        &self,
        person_id: &str,
        as_of: Option<DateTime<Utc>>,
    ) -> TrustResult<CalibrationReport> {
        let as_of = as_of.unwrap_or_else(Utc::now);
        self.auditor.audit(self.store.as_ref(), person_id, as_of)
    }

    // --- Internals ---

    fn require_concept(&self, concept_id: &str) -> TrustResult<()> {
        if self.store.concept_exists(concept_id)? {
            Ok(())
        } else {
            Err(TrustError::UnknownConcept {
                concept_id: concept_id.to_string(),
            })
        }
    }

    fn component_members(&self, person_id: &str, concept_id: &str) -> TrustResult<ScopeMembers> {
        resolve(
            self.store.as_ref(),
            person_id,
            &Scope::Component(concept_id.to_string()),
        )
    }

    /// Rebuild if stale. Caller holds the scope lock.
    fn ensure_fresh_locked(&self, members: &ScopeMembers) -> TrustResult<()> {
        let freshness = check_freshness(self.store.as_ref(), members)?;
        if !freshness.fresh {
            project_scope(self.store.as_ref(), members)?;
        }
        Ok(())
    }

    fn read_state(
        &self,
        members: &ScopeMembers,
        concept_id: &str,
        as_of: DateTime<Utc>,
    ) -> TrustResult<Option<TrustState>> {
        match self.store.get_snapshot(&members.person_id, concept_id)? {
            Some(snapshot) => Ok(Some(self.decorate(snapshot.state, as_of)?)),
            None => Ok(None),
        }
    }

    /// Populate the query-time-only fields: decayed confidence and the
    /// latest claim's calibration gap.
    fn decorate(&self, mut state: TrustState, as_of: DateTime<Utc>) -> TrustResult<TrustState> {
        let dependents = self.store.downstream_dependent_count(&state.concept_id)?;
        let decayed = self.decay.decayed_confidence(&state, as_of, dependents);
        state.decayed_confidence = Some(decayed);

        state.calibration_gap = self
            .store
            .latest_claim(&state.person_id, &state.concept_id)?
            .map(|claim| claim.self_reported_confidence - decayed);

        Ok(state)
    }
}
