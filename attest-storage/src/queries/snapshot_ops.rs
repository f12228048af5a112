//! Trust snapshot cache rows: read, insert, scoped delete.

use std::collections::BTreeSet;

use rusqlite::{params, Connection, Row};

use attest_core::errors::TrustResult;
use attest_core::trust::{Confidence, TrustSnapshot, TrustState, VersionStamp};

use super::{parse_ts, placeholders};
use crate::to_storage_err;

const SNAPSHOT_COLUMNS: &str = "person_id, concept_id, level, confidence, last_verified, \
     inferred_from, modalities_tested, derived_from_event_seq, \
     graph_version, model_version, taxonomy_version, computed_at";

#[allow(clippy::type_complexity)]
type RawSnapshot = (
    String,
    String,
    String,
    f64,
    Option<String>,
    String,
    String,
    i64,
    u32,
    u32,
    u32,
    String,
);

fn raw_from_row(row: &Row<'_>) -> rusqlite::Result<RawSnapshot> {
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
        row.get(9)?,
        row.get(10)?,
        row.get(11)?,
    ))
}

fn collect_snapshots(rows: Vec<RawSnapshot>) -> TrustResult<Vec<TrustSnapshot>> {
    let mut snapshots = Vec::with_capacity(rows.len());
    for (
        person_id,
        concept_id,
        level_str,
        confidence,
        last_verified,
        inferred_from_json,
        modalities_json,
        derived_from_event_seq,
        graph_version,
        model_version,
        taxonomy_version,
        computed_at,
    ) in rows
    {
        let level = serde_json::from_str(&format!("\"{level_str}\""))
            .map_err(|e| to_storage_err(format!("parse trust level: {e}")))?;
        let inferred_from: BTreeSet<String> = serde_json::from_str(&inferred_from_json)
            .map_err(|e| to_storage_err(format!("parse inferred_from: {e}")))?;
        let modalities_tested = serde_json::from_str(&modalities_json)
            .map_err(|e| to_storage_err(format!("parse modalities_tested: {e}")))?;
        let last_verified = match last_verified {
            Some(raw) => Some(parse_ts(&raw)?),
            None => None,
        };

        snapshots.push(TrustSnapshot {
            state: TrustState {
                person_id,
                concept_id,
                level,
                confidence: Confidence::new(confidence),
                last_verified,
                inferred_from,
                modalities_tested,
                decayed_confidence: None,
                calibration_gap: None,
            },
            derived_from_event_seq,
            stamp: VersionStamp::new(graph_version, model_version, taxonomy_version),
            computed_at: parse_ts(&computed_at)?,
        });
    }
    Ok(snapshots)
}

pub fn insert_snapshot(conn: &Connection, snapshot: &TrustSnapshot) -> TrustResult<()> {
    let state = &snapshot.state;
    let inferred_from = serde_json::to_string(&state.inferred_from)?;
    let modalities = serde_json::to_string(&state.modalities_tested)?;
    let level = serde_json::to_string(&state.level)?;

    conn.execute(
        "INSERT OR REPLACE INTO trust_snapshots (
            person_id, concept_id, level, confidence, last_verified,
            inferred_from, modalities_tested, derived_from_event_seq,
            graph_version, model_version, taxonomy_version, computed_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            state.person_id,
            state.concept_id,
            level.trim_matches('"'),
            state.confidence.value(),
            state.last_verified.map(|t| t.to_rfc3339()),
            inferred_from,
            modalities,
            snapshot.derived_from_event_seq,
            snapshot.stamp.graph_version,
            snapshot.stamp.model_version,
            snapshot.stamp.taxonomy_version,
            snapshot.computed_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_snapshot(
    conn: &Connection,
    person_id: &str,
    concept_id: &str,
) -> TrustResult<Option<TrustSnapshot>> {
    let sql = format!(
        "SELECT {SNAPSHOT_COLUMNS} FROM trust_snapshots
         WHERE person_id = ?1 AND concept_id = ?2"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![person_id, concept_id], raw_from_row)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(collect_snapshots(rows)?.into_iter().next())
}

pub fn snapshots_for(
    conn: &Connection,
    person_id: &str,
    concept_ids: &[String],
) -> TrustResult<Vec<TrustSnapshot>> {
    if concept_ids.is_empty() {
        return Ok(Vec::new());
    }
    let person_slot = concept_ids.len() + 1;
    let sql = format!(
        "SELECT {SNAPSHOT_COLUMNS} FROM trust_snapshots
         WHERE concept_id IN ({}) AND person_id = ?{person_slot}",
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
    collect_snapshots(rows)
}

pub fn person_snapshots(conn: &Connection, person_id: &str) -> TrustResult<Vec<TrustSnapshot>> {
    let sql = format!("SELECT {SNAPSHOT_COLUMNS} FROM trust_snapshots WHERE person_id = ?1");
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![person_id], raw_from_row)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect_snapshots(rows)
}

/// Delete every snapshot for the member concepts. Only ever called inside
/// the projection transaction.
pub fn delete_snapshots(
    conn: &Connection,
    person_id: &str,
    concept_ids: &[String],
) -> TrustResult<usize> {
    if concept_ids.is_empty() {
        return Ok(0);
    }
    let person_slot = concept_ids.len() + 1;
    let sql = format!(
        "DELETE FROM trust_snapshots
         WHERE concept_id IN ({}) AND person_id = ?{person_slot}",
        placeholders(concept_ids.len()),
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;

    let mut bound: Vec<&dyn rusqlite::types::ToSql> = Vec::with_capacity(person_slot);
    for id in concept_ids {
        bound.push(id);
    }
    bound.push(&person_id);

    stmt.execute(bound.as_slice())
        .map_err(|e| to_storage_err(e.to_string()))
}
