//! v003: trust_snapshots, projection_checkpoints.

use rusqlite::Connection;

use attest_core::errors::TrustResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> TrustResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS trust_snapshots (
            person_id               TEXT NOT NULL,
            concept_id              TEXT NOT NULL,
            level                   TEXT NOT NULL,
            confidence              REAL NOT NULL,
            last_verified           TEXT,
            inferred_from           TEXT NOT NULL DEFAULT '[]',
            modalities_tested       TEXT NOT NULL DEFAULT '[]',
            derived_from_event_seq  INTEGER NOT NULL,
            graph_version           INTEGER NOT NULL,
            model_version           INTEGER NOT NULL,
            taxonomy_version        INTEGER NOT NULL,
            computed_at             TEXT NOT NULL,
            PRIMARY KEY (person_id, concept_id)
        );

        CREATE INDEX IF NOT EXISTS idx_snapshots_person ON trust_snapshots(person_id);

        CREATE TABLE IF NOT EXISTS projection_checkpoints (
            scope_key         TEXT PRIMARY KEY,
            person_id         TEXT NOT NULL,
            event_seq         INTEGER NOT NULL,
            graph_version     INTEGER NOT NULL,
            model_version     INTEGER NOT NULL,
            taxonomy_version  INTEGER NOT NULL,
            computed_at       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_checkpoints_person ON projection_checkpoints(person_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
