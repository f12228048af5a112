//! The audit trail behind retractions. Events are flagged in place; the
//! who/why/when lives here forever.

use rusqlite::{params, Connection};

use attest_core::errors::TrustResult;

use crate::to_storage_err;

/// Write the audit record that accompanies every retraction.
pub fn insert_record(
    conn: &Connection,
    event_id: &str,
    event_kind: &str,
    reason: &str,
    retracted_by: &str,
    timestamp: &str,
) -> TrustResult<()> {
    conn.execute(
        "INSERT INTO retractions (event_id, event_kind, reason, retracted_by, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![event_id, event_kind, reason, retracted_by, timestamp],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Audit records for one event id, oldest first.
pub fn records_for(conn: &Connection, event_id: &str) -> TrustResult<Vec<(String, String, String)>> {
    let mut stmt = conn
        .prepare(
            "SELECT event_kind, reason, retracted_by FROM retractions
             WHERE event_id = ?1 ORDER BY id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![event_id], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(rows)
}
