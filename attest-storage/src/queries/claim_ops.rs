//! Claim event append, reads, retraction flag.

use rusqlite::{params, Connection, Row};

use attest_core::errors::TrustResult;
use attest_core::events::ClaimEvent;

use super::parse_ts;
use crate::to_storage_err;

const CLAIM_COLUMNS: &str =
    "id, person_id, concept_id, self_reported_confidence, context, timestamp, retracted";

type RawClaim = (String, String, String, f64, String, String, bool);

fn raw_from_row(row: &Row<'_>) -> rusqlite::Result<RawClaim> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get::<_, i64>(6)? != 0,
    ))
}

fn collect_claims(rows: Vec<RawClaim>) -> TrustResult<Vec<ClaimEvent>> {
    let mut claims = Vec::with_capacity(rows.len());
    for (id, person_id, concept_id, self_reported_confidence, context, timestamp, retracted) in rows
    {
        claims.push(ClaimEvent {
            id,
            person_id,
            concept_id,
            self_reported_confidence,
            context,
            timestamp: parse_ts(&timestamp)?,
            retracted,
        });
    }
    Ok(claims)
}

pub fn append_claim(conn: &Connection, claim: &ClaimEvent) -> TrustResult<()> {
    conn.execute(
        "INSERT INTO claim_events
            (id, person_id, concept_id, self_reported_confidence, context, timestamp, retracted)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)",
        params![
            claim.id,
            claim.person_id,
            claim.concept_id,
            claim.self_reported_confidence,
            claim.context,
            claim.timestamp.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Non-retracted claims for a pair, oldest first.
pub fn claim_history(
    conn: &Connection,
    person_id: &str,
    concept_id: &str,
) -> TrustResult<Vec<ClaimEvent>> {
    let sql = format!(
        "SELECT {CLAIM_COLUMNS} FROM claim_events
         WHERE person_id = ?1 AND concept_id = ?2 AND retracted = 0
         ORDER BY timestamp, id"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![person_id, concept_id], raw_from_row)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect_claims(rows)
}

/// Most recent non-retracted claim for a pair, if any.
pub fn latest_claim(
    conn: &Connection,
    person_id: &str,
    concept_id: &str,
) -> TrustResult<Option<ClaimEvent>> {
    let sql = format!(
        "SELECT {CLAIM_COLUMNS} FROM claim_events
         WHERE person_id = ?1 AND concept_id = ?2 AND retracted = 0
         ORDER BY timestamp DESC, id DESC LIMIT 1"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![person_id, concept_id], raw_from_row)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(collect_claims(rows)?.into_iter().next())
}

pub fn get_claim(conn: &Connection, claim_id: &str) -> TrustResult<Option<ClaimEvent>> {
    let sql = format!("SELECT {CLAIM_COLUMNS} FROM claim_events WHERE id = ?1");
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![claim_id], raw_from_row)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(collect_claims(rows)?.into_iter().next())
}

/// Flip the retracted flag. Returns false for unknown or already-retracted
/// claims.
pub fn mark_retracted(conn: &Connection, claim_id: &str) -> TrustResult<bool> {
    let changed = conn
        .execute(
            "UPDATE claim_events SET retracted = 1 WHERE id = ?1 AND retracted = 0",
            params![claim_id],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(changed > 0)
}
