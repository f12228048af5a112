//! Concept and edge CRUD plus adjacency queries.

use rusqlite::{params, Connection};

use attest_core::errors::TrustResult;
use attest_core::graph::{ConceptEdge, ConceptNode, EdgeType};

use crate::to_storage_err;

pub fn upsert_concept(conn: &Connection, concept: &ConceptNode) -> TrustResult<()> {
    conn.execute(
        "INSERT INTO concepts (id, name, description) VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET name = ?2, description = ?3",
        params![concept.id, concept.name, concept.description],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_concept(conn: &Connection, concept_id: &str) -> TrustResult<Option<ConceptNode>> {
    let mut stmt = conn
        .prepare("SELECT id, name, description FROM concepts WHERE id = ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt
        .query_map(params![concept_id], |row| {
            Ok(ConceptNode {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    match rows.next() {
        Some(row) => Ok(Some(row.map_err(|e| to_storage_err(e.to_string()))?)),
        None => Ok(None),
    }
}

pub fn concept_exists(conn: &Connection, concept_id: &str) -> TrustResult<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM concepts WHERE id = ?1)",
        params![concept_id],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn upsert_edge(conn: &Connection, edge: &ConceptEdge) -> TrustResult<()> {
    conn.execute(
        "INSERT INTO concept_edges (id, from_id, to_id, edge_type, inference_strength)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(from_id, to_id, edge_type)
         DO UPDATE SET inference_strength = ?5",
        params![
            edge.id,
            edge.from,
            edge.to,
            edge.edge_type.as_str(),
            edge.inference_strength,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn edges_from(conn: &Connection, concept_id: &str) -> TrustResult<Vec<ConceptEdge>> {
    edges_where(conn, "from_id = ?1", concept_id)
}

pub fn edges_to(conn: &Connection, concept_id: &str) -> TrustResult<Vec<ConceptEdge>> {
    edges_where(conn, "to_id = ?1", concept_id)
}

fn edges_where(conn: &Connection, clause: &str, concept_id: &str) -> TrustResult<Vec<ConceptEdge>> {
    let sql = format!(
        "SELECT id, from_id, to_id, edge_type, inference_strength
         FROM concept_edges WHERE {clause}"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![concept_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, f64>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut edges = Vec::new();
    for row in rows {
        let (id, from, to, edge_type_str, inference_strength) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let edge_type: EdgeType = edge_type_str
            .parse()
            .map_err(|e| to_storage_err(format!("parse edge type: {e}")))?;
        edges.push(ConceptEdge {
            id,
            from,
            to,
            edge_type,
            inference_strength,
        });
    }
    Ok(edges)
}

/// Concepts for which the given concept is a prerequisite.
pub fn downstream_dependent_count(conn: &Connection, concept_id: &str) -> TrustResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM concept_edges
             WHERE from_id = ?1 AND edge_type = 'prerequisite'",
            params![concept_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}
