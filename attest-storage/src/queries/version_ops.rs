//! The singleton version triple: graph, scoring model, modality taxonomy.

use rusqlite::Connection;

use attest_core::errors::TrustResult;
use attest_core::trust::VersionStamp;

use crate::to_storage_err;

pub fn version_stamp(conn: &Connection) -> TrustResult<VersionStamp> {
    conn.query_row(
        "SELECT graph_version, model_version, taxonomy_version FROM trust_versions WHERE id = 1",
        [],
        |row| Ok(VersionStamp::new(row.get(0)?, row.get(1)?, row.get(2)?)),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn bump(conn: &Connection, column: &str) -> TrustResult<u32> {
    // Column names come from the three fixed call sites, never user input.
    let sql = format!(
        "UPDATE trust_versions SET {column} = {column} + 1 WHERE id = 1 RETURNING {column}"
    );
    conn.query_row(&sql, [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}
