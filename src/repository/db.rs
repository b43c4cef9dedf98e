//! Database Connection and Setup
//!
//! Manages SQLite database connection and migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::DomainError;

/// Shared handle to the (possibly not yet opened) connection
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
}

impl DbState {
    pub fn new() -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
        }
    }

    /// True once `init_db` has stored a connection
    pub async fn is_initialized(&self) -> bool {
        self.conn.lock().await.is_some()
    }
}

impl Default for DbState {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a storage error into the domain
pub(crate) fn db_err(e: rusqlite::Error) -> DomainError {
    DomainError::Internal(e.to_string())
}

pub(crate) fn not_initialized() -> DomainError {
    DomainError::Internal("Database not initialized".to_string())
}

/// Open the database at `db_path` (":memory:" for a private in-memory one)
/// and run migrations
pub async fn init_db(db_path: &Path) -> Result<DbState, String> {
    let conn = if db_path.as_os_str() == ":memory:" {
        Connection::open_in_memory()
    } else {
        Connection::open(db_path)
    }
    .map_err(|e| format!("Failed to open db: {}", e))?;

    run_migrations(&conn)?;
    log::debug!("tag database ready at {}", db_path.display());

    let state = DbState::new();
    *state.conn.lock().await = Some(conn);
    Ok(state)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            created_at INTEGER,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS tag_aliases (
            tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
            alias TEXT NOT NULL UNIQUE,
            PRIMARY KEY (tag_id, alias)
        );

        CREATE TABLE IF NOT EXISTS tag_relations (
            parent_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
            child_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
            PRIMARY KEY (parent_id, child_id),
            CHECK (parent_id <> child_id)
        );

        CREATE INDEX IF NOT EXISTS idx_tag_relations_child ON tag_relations(child_id);",
    )
    .map_err(|e| e.to_string())
}
