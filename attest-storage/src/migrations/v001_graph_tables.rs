//! v001: concepts, concept_edges, trust_versions.

use rusqlite::Connection;

use attest_core::errors::TrustResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> TrustResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS concepts (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS concept_edges (
            id                  TEXT PRIMARY KEY,
            from_id             TEXT NOT NULL REFERENCES concepts(id),
            to_id               TEXT NOT NULL REFERENCES concepts(id),
            edge_type           TEXT NOT NULL,
            inference_strength  REAL NOT NULL,
            UNIQUE (from_id, to_id, edge_type)
        );

        CREATE INDEX IF NOT EXISTS idx_edges_from ON concept_edges(from_id);
        CREATE INDEX IF NOT EXISTS idx_edges_to ON concept_edges(to_id);

        CREATE TABLE IF NOT EXISTS trust_versions (
            id                INTEGER PRIMARY KEY CHECK (id = 1),
            graph_version     INTEGER NOT NULL,
            model_version     INTEGER NOT NULL,
            taxonomy_version  INTEGER NOT NULL
        );

        INSERT OR IGNORE INTO trust_versions (id, graph_version, model_version, taxonomy_version)
        VALUES (1, 1, 1, 1);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
