//! The single write connection. The core is synchronous per call, so one
//! mutex-guarded connection is the whole pool; WAL keeps readers of the
//! same file unblocked.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use attest_core::errors::TrustResult;

use crate::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a connection to the given database file.
    pub fn open(path: &Path) -> TrustResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory connection (for testing).
    pub fn open_in_memory() -> TrustResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a closure against the connection.
    pub fn with_conn<F, T>(&self, f: F) -> TrustResult<T>
    where
        F: FnOnce(&Connection) -> TrustResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|_| to_storage_err("connection mutex poisoned".to_string()))?;
        f(&guard)
    }
}
