//! Verification event append, ordered reads, retraction flag.

use rusqlite::{params, Connection, Row};

use attest_core::errors::TrustResult;
use attest_core::events::VerificationEvent;

use super::{parse_ts, placeholders};
use crate::to_storage_err;

const EVENT_COLUMNS: &str =
    "seq, id, person_id, concept_id, modality, result, source, context, timestamp, retracted";

/// Raw row image, parsed into domain enums in `collect_events`.
type RawEvent = (i64, String, String, String, String, String, String, String, String, bool);

fn raw_from_row(row: &Row<'_>) -> rusqlite::Result<RawEvent> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get::<_, i64>(9)? != 0,
    ))
}

fn collect_events(rows: Vec<RawEvent>) -> TrustResult<Vec<VerificationEvent>> {
    let mut events = Vec::with_capacity(rows.len());
    for (seq, id, person_id, concept_id, modality, result, source, context, timestamp, retracted) in
        rows
    {
        events.push(VerificationEvent {
            seq,
            id,
            person_id,
            concept_id,
            modality: modality
                .parse()
                .map_err(|e| to_storage_err(format!("parse modality: {e}")))?,
            result: result
                .parse()
                .map_err(|e| to_storage_err(format!("parse result: {e}")))?,
            source: source
                .parse()
                .map_err(|e| to_storage_err(format!("parse source: {e}")))?,
            context,
            timestamp: parse_ts(&timestamp)?,
            retracted,
        });
    }
    Ok(events)
}

/// Append an event to the log; returns the assigned sequence number.
pub fn append_verification(conn: &Connection, event: &VerificationEvent) -> TrustResult<i64> {
    conn.execute(
        "INSERT INTO verification_events
            (id, person_id, concept_id, modality, result, context, source, timestamp, retracted)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0)",
        params![
            event.id,
            event.person_id,
            event.concept_id,
            event.modality.as_str(),
            event.result.as_str(),
            event.context,
            event.source.as_str(),
            event.timestamp.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Non-retracted history for one (person, concept) pair, replay-ordered.
pub fn verification_history(
    conn: &Connection,
    person_id: &str,
    concept_id: &str,
) -> TrustResult<Vec<VerificationEvent>> {
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM verification_events
         WHERE person_id = ?1 AND concept_id = ?2 AND retracted = 0
         ORDER BY timestamp, seq, id"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![person_id, concept_id], raw_from_row)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect_events(rows)
}

/// Non-retracted history across a concept set, replay-ordered.
pub fn scope_verification_history(
    conn: &Connection,
    person_id: &str,
    concept_ids: &[String],
) -> TrustResult<Vec<VerificationEvent>> {
    if concept_ids.is_empty() {
        return Ok(Vec::new());
    }
    // The person id binds after the IN list.
    let person_slot = concept_ids.len() + 1;
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM verification_events
         WHERE concept_id IN ({}) AND person_id = ?{person_slot} AND retracted = 0
         ORDER BY timestamp, seq, id",
        placeholders(concept_ids.len()),
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;

    let mut bound: Vec<&dyn rusqlite::types::ToSql> = Vec::with_capacity(person_slot);
    for id in concept_ids {
        bound.push(id);
    }
    bound.push(&person_id);

    let rows = stmt
        .query_map(bound.as_slice(), raw_from_row)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect_events(rows)
}

pub fn get_verification(
    conn: &Connection,
    event_id: &str,
) -> TrustResult<Option<VerificationEvent>> {
    let sql = format!("SELECT {EVENT_COLUMNS} FROM verification_events WHERE id = ?1");
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![event_id], raw_from_row)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(collect_events(rows)?.into_iter().next())
}

/// Highest sequence among a person's events for the given concepts,
/// retracted included — a retraction advances staleness via the forced
/// recompute, but the log position itself never moves backwards.
pub fn latest_event_seq(
    conn: &Connection,
    person_id: &str,
    concept_ids: &[String],
) -> TrustResult<i64> {
    if concept_ids.is_empty() {
        return Ok(0);
    }
    let person_slot = concept_ids.len() + 1;
    let sql = format!(
        "SELECT COALESCE(MAX(seq), 0) FROM verification_events
         WHERE concept_id IN ({}) AND person_id = ?{person_slot}",
        placeholders(concept_ids.len()),
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;

    let mut bound: Vec<&dyn rusqlite::types::ToSql> = Vec::with_capacity(person_slot);
    for id in concept_ids {
        bound.push(id);
    }
    bound.push(&person_id);

    stmt.query_row(bound.as_slice(), |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Flip the retracted flag. Returns false when the id is unknown or the
/// event was already retracted.
pub fn mark_retracted(conn: &Connection, event_id: &str) -> TrustResult<bool> {
    let changed = conn
        .execute(
            "UPDATE verification_events SET retracted = 1 WHERE id = ?1 AND retracted = 0",
            params![event_id],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(changed > 0)
}
