//! StorageEngine — owns the write connection, runs migrations on open, and
//! implements the ITrustStore contract, including the atomic scope rewrite.

use std::path::Path;

use chrono::{DateTime, Utc};

use attest_core::errors::TrustResult;
use attest_core::events::{ClaimEvent, VerificationEvent};
use attest_core::graph::{ConceptEdge, ConceptNode};
use attest_core::models::{Checkpoint, ProjectionJob};
use attest_core::traits::ITrustStore;
use attest_core::trust::{TrustSnapshot, VersionStamp};

use crate::connection::WriteConnection;
use crate::migrations;
use crate::queries::{
    checkpoint_ops, claim_ops, concept_ops, event_ops, job_ops, retraction_ops, snapshot_ops,
    version_ops,
};
use crate::to_storage_err;

pub struct StorageEngine {
    conn: WriteConnection,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> TrustResult<Self> {
        let engine = Self {
            conn: WriteConnection::open(path)?,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> TrustResult<Self> {
        let engine = Self {
            conn: WriteConnection::open_in_memory()?,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> TrustResult<()> {
        self.conn.with_conn(migrations::run_migrations)
    }

    /// Pending projection jobs for a scope (diagnostic hook).
    pub fn pending_jobs(&self, scope_key: &str) -> TrustResult<Vec<ProjectionJob>> {
        self.conn.with_conn(|conn| job_ops::pending_jobs(conn, scope_key))
    }

    /// Retraction audit entries (kind, reason, retracted_by) for an event.
    pub fn retraction_audit(&self, event_id: &str) -> TrustResult<Vec<(String, String, String)>> {
        self.conn.with_conn(|conn| retraction_ops::records_for(conn, event_id))
    }
}

impl ITrustStore for StorageEngine {
    // --- Graph ---

    fn upsert_concept(&self, concept: &ConceptNode) -> TrustResult<()> {
        self.conn.with_conn(|conn| concept_ops::upsert_concept(conn, concept))
    }

    fn get_concept(&self, concept_id: &str) -> TrustResult<Option<ConceptNode>> {
        self.conn.with_conn(|conn| concept_ops::get_concept(conn, concept_id))
    }

    fn concept_exists(&self, concept_id: &str) -> TrustResult<bool> {
        self.conn.with_conn(|conn| concept_ops::concept_exists(conn, concept_id))
    }

    fn upsert_edge(&self, edge: &ConceptEdge) -> TrustResult<()> {
        self.conn.with_conn(|conn| concept_ops::upsert_edge(conn, edge))
    }

    fn edges_from(&self, concept_id: &str) -> TrustResult<Vec<ConceptEdge>> {
        self.conn.with_conn(|conn| concept_ops::edges_from(conn, concept_id))
    }

    fn edges_to(&self, concept_id: &str) -> TrustResult<Vec<ConceptEdge>> {
        self.conn.with_conn(|conn| concept_ops::edges_to(conn, concept_id))
    }

    fn downstream_dependent_count(&self, concept_id: &str) -> TrustResult<usize> {
        self.conn
            .with_conn(|conn| concept_ops::downstream_dependent_count(conn, concept_id))
    }

    // --- Verification log ---

    fn append_verification(&self, event: &VerificationEvent) -> TrustResult<i64> {
        self.conn.with_conn(|conn| event_ops::append_verification(conn, event))
    }

    fn verification_history(
        &self,
        person_id: &str,
        concept_id: &str,
    ) -> TrustResult<Vec<VerificationEvent>> {
        self.conn
            .with_conn(|conn| event_ops::verification_history(conn, person_id, concept_id))
    }

    fn scope_verification_history(
        &self,
        person_id: &str,
        concept_ids: &[String],
    ) -> TrustResult<Vec<VerificationEvent>> {
        self.conn
            .with_conn(|conn| event_ops::scope_verification_history(conn, person_id, concept_ids))
    }

    fn get_verification(&self, event_id: &str) -> TrustResult<Option<VerificationEvent>> {
        self.conn.with_conn(|conn| event_ops::get_verification(conn, event_id))
    }

    fn latest_event_seq(&self, person_id: &str, concept_ids: &[String]) -> TrustResult<i64> {
        self.conn
            .with_conn(|conn| event_ops::latest_event_seq(conn, person_id, concept_ids))
    }

    // --- Claim log ---

    fn append_claim(&self, claim: &ClaimEvent) -> TrustResult<()> {
        self.conn.with_conn(|conn| claim_ops::append_claim(conn, claim))
    }

    fn claim_history(&self, person_id: &str, concept_id: &str) -> TrustResult<Vec<ClaimEvent>> {
        self.conn
            .with_conn(|conn| claim_ops::claim_history(conn, person_id, concept_id))
    }

    fn latest_claim(&self, person_id: &str, concept_id: &str) -> TrustResult<Option<ClaimEvent>> {
        self.conn
            .with_conn(|conn| claim_ops::latest_claim(conn, person_id, concept_id))
    }

    fn get_claim(&self, claim_id: &str) -> TrustResult<Option<ClaimEvent>> {
        self.conn.with_conn(|conn| claim_ops::get_claim(conn, claim_id))
    }

    // --- Retraction ---

    fn mark_verification_retracted(
        &self,
        event_id: &str,
        reason: &str,
        retracted_by: &str,
        timestamp: DateTime<Utc>,
    ) -> TrustResult<bool> {
        self.conn.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(format!("retract verification begin: {e}")))?;

            let flipped = event_ops::mark_retracted(&tx, event_id)?;
            if flipped {
                retraction_ops::insert_record(
                    &tx,
                    event_id,
                    "verification",
                    reason,
                    retracted_by,
                    &timestamp.to_rfc3339(),
                )?;
            }

            tx.commit()
                .map_err(|e| to_storage_err(format!("retract verification commit: {e}")))?;
            Ok(flipped)
        })
    }

    fn mark_claim_retracted(
        &self,
        claim_id: &str,
        reason: &str,
        retracted_by: &str,
        timestamp: DateTime<Utc>,
    ) -> TrustResult<bool> {
        self.conn.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(format!("retract claim begin: {e}")))?;

            let flipped = claim_ops::mark_retracted(&tx, claim_id)?;
            if flipped {
                retraction_ops::insert_record(
                    &tx,
                    claim_id,
                    "claim",
                    reason,
                    retracted_by,
                    &timestamp.to_rfc3339(),
                )?;
            }

            tx.commit()
                .map_err(|e| to_storage_err(format!("retract claim commit: {e}")))?;
            Ok(flipped)
        })
    }

    // --- Snapshot cache ---

    fn get_snapshot(
        &self,
        person_id: &str,
        concept_id: &str,
    ) -> TrustResult<Option<TrustSnapshot>> {
        self.conn
            .with_conn(|conn| snapshot_ops::get_snapshot(conn, person_id, concept_id))
    }

    fn snapshots_for(
        &self,
        person_id: &str,
        concept_ids: &[String],
    ) -> TrustResult<Vec<TrustSnapshot>> {
        self.conn
            .with_conn(|conn| snapshot_ops::snapshots_for(conn, person_id, concept_ids))
    }

    fn person_snapshots(&self, person_id: &str) -> TrustResult<Vec<TrustSnapshot>> {
        self.conn.with_conn(|conn| snapshot_ops::person_snapshots(conn, person_id))
    }

    // --- Checkpoints & jobs ---

    fn get_checkpoint(&self, scope_key: &str) -> TrustResult<Option<Checkpoint>> {
        self.conn.with_conn(|conn| checkpoint_ops::get_checkpoint(conn, scope_key))
    }

    fn enqueue_projection_job(&self, scope_key: &str, person_id: &str) -> TrustResult<i64> {
        self.conn.with_conn(|conn| {
            job_ops::enqueue(conn, scope_key, person_id, &Utc::now().to_rfc3339())
        })
    }

    fn commit_projection(
        &self,
        checkpoint: &Checkpoint,
        concept_ids: &[String],
        snapshots: &[TrustSnapshot],
    ) -> TrustResult<()> {
        self.conn.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(format!("commit projection begin: {e}")))?;

            snapshot_ops::delete_snapshots(&tx, &checkpoint.person_id, concept_ids)?;
            for snapshot in snapshots {
                snapshot_ops::insert_snapshot(&tx, snapshot)?;
            }
            checkpoint_ops::upsert_checkpoint(&tx, checkpoint)?;
            job_ops::complete_pending(&tx, &checkpoint.scope_key, &checkpoint.computed_at.to_rfc3339())?;

            tx.commit()
                .map_err(|e| to_storage_err(format!("commit projection commit: {e}")))?;

            tracing::debug!(
                scope = %checkpoint.scope_key,
                snapshots = snapshots.len(),
                event_seq = checkpoint.event_seq,
                "committed scope projection"
            );
            Ok(())
        })
    }

    // --- Version metadata ---

    fn version_stamp(&self) -> TrustResult<VersionStamp> {
        self.conn.with_conn(version_ops::version_stamp)
    }

    fn bump_graph_version(&self) -> TrustResult<u32> {
        self.conn.with_conn(|conn| version_ops::bump(conn, "graph_version"))
    }

    fn bump_model_version(&self) -> TrustResult<u32> {
        self.conn.with_conn(|conn| version_ops::bump(conn, "model_version"))
    }

    fn bump_taxonomy_version(&self) -> TrustResult<u32> {
        self.conn.with_conn(|conn| version_ops::bump(conn, "taxonomy_version"))
    }
}
