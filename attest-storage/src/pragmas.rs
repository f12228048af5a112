//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, 5s busy_timeout, foreign_keys ON.

use rusqlite::Connection;

use attest_core::errors::TrustResult;

use crate::to_storage_err;

/// Apply performance and safety pragmas to a connection.
pub fn apply_pragmas(conn: &Connection) -> TrustResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
