use chrono::{DateTime, Utc};

use crate::errors::TrustResult;
use crate::events::{ClaimEvent, VerificationEvent};
use crate::graph::{ConceptEdge, ConceptNode};
use crate::models::Checkpoint;
use crate::trust::{TrustSnapshot, VersionStamp};

/// The storage contract the core depends on: graph + append-only event log
/// + snapshot cache + checkpoints + version metadata.
///
/// The reference implementation backs this with embedded SQLite; any
/// ordered, transactional store satisfies the contract. Multi-write
/// atomicity is expressed through `commit_projection` rather than a
/// caller-supplied transaction closure, so the trait stays object-safe.
pub trait ITrustStore: Send + Sync {
    // --- Graph ---
    fn upsert_concept(&self, concept: &ConceptNode) -> TrustResult<()>;
    fn get_concept(&self, concept_id: &str) -> TrustResult<Option<ConceptNode>>;
    fn concept_exists(&self, concept_id: &str) -> TrustResult<bool>;
    fn upsert_edge(&self, edge: &ConceptEdge) -> TrustResult<()>;
    fn edges_from(&self, concept_id: &str) -> TrustResult<Vec<ConceptEdge>>;
    fn edges_to(&self, concept_id: &str) -> TrustResult<Vec<ConceptEdge>>;
    /// Number of concepts for which the given concept is a prerequisite.
    fn downstream_dependent_count(&self, concept_id: &str) -> TrustResult<usize>;

    // --- Verification log ---
    /// Append an event; returns the assigned monotone sequence number.
    fn append_verification(&self, event: &VerificationEvent) -> TrustResult<i64>;
    /// Non-retracted history for one pair, ordered by (timestamp, seq, id).
    fn verification_history(
        &self,
        person_id: &str,
        concept_id: &str,
    ) -> TrustResult<Vec<VerificationEvent>>;
    /// Non-retracted history across a concept set, same ordering.
    fn scope_verification_history(
        &self,
        person_id: &str,
        concept_ids: &[String],
    ) -> TrustResult<Vec<VerificationEvent>>;
    fn get_verification(&self, event_id: &str) -> TrustResult<Option<VerificationEvent>>;
    /// Highest sequence number among a person's events for the given
    /// concepts, retracted included (a retraction advances staleness too).
    fn latest_event_seq(&self, person_id: &str, concept_ids: &[String]) -> TrustResult<i64>;

    // --- Claim log ---
    fn append_claim(&self, claim: &ClaimEvent) -> TrustResult<()>;
    fn claim_history(&self, person_id: &str, concept_id: &str) -> TrustResult<Vec<ClaimEvent>>;
    fn latest_claim(&self, person_id: &str, concept_id: &str) -> TrustResult<Option<ClaimEvent>>;
    fn get_claim(&self, claim_id: &str) -> TrustResult<Option<ClaimEvent>>;

    // --- Retraction ---
    /// Flip the retracted flag and write the audit record in one
    /// transaction. Returns false (no-op) for unknown or already-retracted
    /// ids.
    fn mark_verification_retracted(
        &self,
        event_id: &str,
        reason: &str,
        retracted_by: &str,
        timestamp: DateTime<Utc>,
    ) -> TrustResult<bool>;
    fn mark_claim_retracted(
        &self,
        claim_id: &str,
        reason: &str,
        retracted_by: &str,
        timestamp: DateTime<Utc>,
    ) -> TrustResult<bool>;

    // --- Snapshot cache ---
    fn get_snapshot(&self, person_id: &str, concept_id: &str)
        -> TrustResult<Option<TrustSnapshot>>;
    fn snapshots_for(
        &self,
        person_id: &str,
        concept_ids: &[String],
    ) -> TrustResult<Vec<TrustSnapshot>>;
    fn person_snapshots(&self, person_id: &str) -> TrustResult<Vec<TrustSnapshot>>;

    // --- Checkpoints & jobs ---
    fn get_checkpoint(&self, scope_key: &str) -> TrustResult<Option<Checkpoint>>;
    fn enqueue_projection_job(&self, scope_key: &str, person_id: &str) -> TrustResult<i64>;
    /// The atomic scope rewrite: delete every snapshot for the member
    /// concepts, insert the new rows, advance the checkpoint, and mark
    /// pending jobs for the scope complete — all or nothing. A reader
    /// never observes a partially-updated scope.
    fn commit_projection(
        &self,
        checkpoint: &Checkpoint,
        concept_ids: &[String],
        snapshots: &[TrustSnapshot],
    ) -> TrustResult<()>;

    // --- Version metadata ---
    fn version_stamp(&self) -> TrustResult<VersionStamp>;
    fn bump_graph_version(&self) -> TrustResult<u32>;
    fn bump_model_version(&self) -> TrustResult<u32>;
    fn bump_taxonomy_version(&self) -> TrustResult<u32>;
}
