//! Projection job queue bookkeeping.

use rusqlite::{params, Connection};

use attest_core::errors::TrustResult;
use attest_core::models::{JobStatus, ProjectionJob};

use super::parse_ts;
use crate::to_storage_err;

pub fn enqueue(
    conn: &Connection,
    scope_key: &str,
    person_id: &str,
    created_at: &str,
) -> TrustResult<i64> {
    conn.execute(
        "INSERT INTO projection_jobs (scope_key, person_id, status, created_at)
         VALUES (?1, ?2, 'pending', ?3)",
        params![scope_key, person_id, created_at],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Mark every pending job for a scope complete. Called inside the
/// projection transaction.
pub fn complete_pending(conn: &Connection, scope_key: &str, completed_at: &str) -> TrustResult<usize> {
    conn.execute(
        "UPDATE projection_jobs SET status = 'complete', completed_at = ?2
         WHERE scope_key = ?1 AND status = 'pending'",
        params![scope_key, completed_at],
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Pending jobs for a scope, oldest first.
pub fn pending_jobs(conn: &Connection, scope_key: &str) -> TrustResult<Vec<ProjectionJob>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, scope_key, person_id, status, created_at, completed_at
             FROM projection_jobs
             WHERE scope_key = ?1 AND status = 'pending'
             ORDER BY id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![scope_key], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, Option<String>>(5)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut jobs = Vec::with_capacity(rows.len());
    for (id, scope_key, person_id, status, created_at, completed_at) in rows {
        let status = match status.as_str() {
            "pending" => JobStatus::Pending,
            "complete" => JobStatus::Complete,
            other => return Err(to_storage_err(format!("unknown job status '{other}'"))),
        };
        let completed_at = match completed_at {
            Some(raw) => Some(parse_ts(&raw)?),
            None => None,
        };
        jobs.push(ProjectionJob {
            id,
            scope_key,
            person_id,
            status,
            created_at: parse_ts(&created_at)?,
            completed_at,
        });
    }
    Ok(jobs)
}
