//! v004: projection_jobs.

use rusqlite::Connection;

use attest_core::errors::TrustResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> TrustResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS projection_jobs (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            scope_key     TEXT NOT NULL,
            person_id     TEXT NOT NULL,
            status        TEXT NOT NULL DEFAULT 'pending',
            created_at    TEXT NOT NULL,
            completed_at  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_jobs_scope_status
            ON projection_jobs(scope_key, status);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
