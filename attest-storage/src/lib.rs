//! # attest-storage
//!
//! SQLite-backed implementation of the `ITrustStore` contract: the concept
//! graph, the append-only event log, the snapshot cache, checkpoints, and
//! version metadata. Any ordered, transactional store could satisfy the
//! contract; this one is the embedded reference.

pub mod connection;
pub mod engine;
pub mod migrations;
pub mod pragmas;
pub mod queries;

pub use connection::WriteConnection;
pub use engine::StorageEngine;

use attest_core::errors::{StorageError, TrustError};

/// Map a low-level SQLite failure into the workspace error type.
pub(crate) fn to_storage_err(message: String) -> TrustError {
    TrustError::Storage(StorageError::SqliteError { message })
}
