//! Numbered, forward-only schema migrations. Applied versions are recorded
//! in `schema_migrations`; reruns are no-ops.

pub mod v001_graph_tables;
pub mod v002_event_tables;
pub mod v003_projection_tables;
pub mod v004_projection_jobs;

use rusqlite::Connection;

use attest_core::errors::{StorageError, TrustError, TrustResult};

use crate::to_storage_err;

type Migration = (u32, fn(&Connection) -> TrustResult<()>);

const MIGRATIONS: [Migration; 4] = [
    (1, v001_graph_tables::migrate),
    (2, v002_event_tables::migrate),
    (3, v003_projection_tables::migrate),
    (4, v004_projection_jobs::migrate),
];

/// Run all pending migrations in order.
pub fn run_migrations(conn: &Connection) -> TrustResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    for (version, migrate) in MIGRATIONS {
        let applied: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM schema_migrations WHERE version = ?1)",
                [version],
                |row| row.get(0),
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        if applied {
            continue;
        }

        migrate(conn).map_err(|e| {
            TrustError::Storage(StorageError::MigrationFailed {
                version,
                reason: e.to_string(),
            })
        })?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (?1)", [version])
            .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::debug!(version, "applied schema migration");
    }
    Ok(())
}
