//! Connection management. One write-capable connection behind an async
//! mutex; WAL journal mode so concurrent reader/writer processes don't
//! corrupt each other.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;
use tokio::sync::Mutex;

use guardrail_core::errors::StorageError;

use crate::migrations;
use crate::to_storage_err;

/// SQLite database handle shared across concurrent requests.
pub struct Database {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Database {
    /// Open a file-backed database. Applies pragmas and runs migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(to_storage_err)?;
        configure(&conn)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(to_storage_err)?;
        configure(&conn)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run a closure against the connection. Serializes access within
    /// this process; cross-process safety comes from WAL + busy timeout.
    pub async fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self.conn.lock().await;
        f(&conn)
    }
}

fn configure(conn: &Connection) -> Result<(), StorageError> {
    // journal_mode returns a row; in-memory databases report "memory",
    // which is fine — WAL only matters for shared files.
    conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))
        .map_err(to_storage_err)?;
    conn.pragma_update(None, "synchronous", "NORMAL")
        .map_err(to_storage_err)?;
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(to_storage_err)?;
    conn.busy_timeout(Duration::from_millis(5000))
        .map_err(to_storage_err)?;
    Ok(())
}
