//! v002: verification_events, claim_events, retractions.

use rusqlite::Connection;

use attest_core::errors::TrustResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> TrustResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS verification_events (
            seq         INTEGER PRIMARY KEY AUTOINCREMENT,
            id          TEXT NOT NULL UNIQUE,
            person_id   TEXT NOT NULL,
            concept_id  TEXT NOT NULL,
            modality    TEXT NOT NULL,
            result      TEXT NOT NULL,
            context     TEXT NOT NULL DEFAULT '',
            source      TEXT NOT NULL,
            timestamp   TEXT NOT NULL,
            retracted   INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_verifications_pair
            ON verification_events(person_id, concept_id);
        CREATE INDEX IF NOT EXISTS idx_verifications_person
            ON verification_events(person_id);

        CREATE TABLE IF NOT EXISTS claim_events (
            id                        TEXT PRIMARY KEY,
            person_id                 TEXT NOT NULL,
            concept_id                TEXT NOT NULL,
            self_reported_confidence  REAL NOT NULL,
            context                   TEXT NOT NULL DEFAULT '',
            timestamp                 TEXT NOT NULL,
            retracted                 INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_claims_pair
            ON claim_events(person_id, concept_id);

        CREATE TABLE IF NOT EXISTS retractions (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id      TEXT NOT NULL,
            event_kind    TEXT NOT NULL,
            reason        TEXT NOT NULL,
            retracted_by  TEXT NOT NULL,
            timestamp     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_retractions_event ON retractions(event_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
