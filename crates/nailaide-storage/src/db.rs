//! SQLite handle for the persisted chat state.
//!
//! One connection behind a `Mutex`, shared as `Arc<dyn KeyValueStore>`.
//! File databases run in WAL mode with a busy timeout so two terminal
//! sessions pointed at the same data directory wait on each other instead
//! of failing.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::Connection;
use tracing::{debug, info};

use nailaide_core::error::NailAideError;

use crate::migrations;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

fn storage_error(context: &'static str) -> impl FnOnce(rusqlite::Error) -> NailAideError {
    move |e| NailAideError::Storage(format!("{}: {}", context, e))
}

/// SQLite database holding the persisted chat state.
pub struct Database {
    conn: Mutex<Connection>,
    /// `None` for in-memory databases.
    path: Option<PathBuf>,
}

impl Database {
    /// Open (or create) the database file at `path`, creating missing parent
    /// directories, and bring the schema up to date.
    pub fn new(path: &Path) -> Result<Self, NailAideError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path).map_err(storage_error("Failed to open database"))?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(storage_error("Failed to set busy timeout"))?;
        let journal: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(storage_error("Failed to enable WAL"))?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(storage_error("Failed to set synchronous mode"))?;

        let db = Self::migrated(conn, Some(path.to_path_buf()))?;
        let schema = db.schema_version()?;
        info!(path = %path.display(), journal = %journal, schema, "Database opened");
        Ok(db)
    }

    /// Throwaway database for tests.
    pub fn in_memory() -> Result<Self, NailAideError> {
        let conn = Connection::open_in_memory()
            .map_err(storage_error("Failed to open in-memory database"))?;
        Self::migrated(conn, None)
    }

    fn migrated(conn: Connection, path: Option<PathBuf>) -> Result<Self, NailAideError> {
        migrations::run_migrations(&conn)?;
        debug!(in_memory = path.is_none(), "Schema up to date");
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Highest applied migration.
    pub fn schema_version(&self) -> Result<i64, NailAideError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
                [],
                |row| row.get(0),
            )
            .map_err(storage_error("Failed to read schema version"))
        })
    }

    /// Run `f` with the connection locked.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, NailAideError>
    where
        F: FnOnce(&Connection) -> Result<T, NailAideError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| NailAideError::Storage(format!("Database lock poisoned: {}", e)))?;
        f(&conn)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("path", &self.path).finish()
    }
}
