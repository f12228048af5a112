//! Projection checkpoint get/upsert.

use rusqlite::{params, Connection};

use attest_core::errors::TrustResult;
use attest_core::models::Checkpoint;
use attest_core::trust::VersionStamp;

use super::parse_ts;
use crate::to_storage_err;

pub fn get_checkpoint(conn: &Connection, scope_key: &str) -> TrustResult<Option<Checkpoint>> {
    let mut stmt = conn
        .prepare(
            "SELECT scope_key, person_id, event_seq,
                    graph_version, model_version, taxonomy_version, computed_at
             FROM projection_checkpoints WHERE scope_key = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![scope_key], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, u32>(3)?,
                row.get::<_, u32>(4)?,
                row.get::<_, u32>(5)?,
                row.get::<_, String>(6)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match rows.into_iter().next() {
        Some((scope_key, person_id, event_seq, graph, model, taxonomy, computed_at)) => {
            Ok(Some(Checkpoint {
                scope_key,
                person_id,
                event_seq,
                stamp: VersionStamp::new(graph, model, taxonomy),
                computed_at: parse_ts(&computed_at)?,
            }))
        }
        None => Ok(None),
    }
}

pub fn upsert_checkpoint(conn: &Connection, checkpoint: &Checkpoint) -> TrustResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO projection_checkpoints
            (scope_key, person_id, event_seq,
             graph_version, model_version, taxonomy_version, computed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            checkpoint.scope_key,
            checkpoint.person_id,
            checkpoint.event_seq,
            checkpoint.stamp.graph_version,
            checkpoint.stamp.model_version,
            checkpoint.stamp.taxonomy_version,
            checkpoint.computed_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
