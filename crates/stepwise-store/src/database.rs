//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and is the SQLite
//! [`Executor`] the migration runner drives.  Every migration script is run
//! inside its own SQLite transaction, so a script that fails halfway leaves
//! no trace.

use std::path::{Path, PathBuf};

use rusqlite::{params_from_iter, Connection};
use stepwise_core::{Executor, MigrateReport, Registry, Version};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::StoreError;

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database described by `config`.
    ///
    /// The parent directory of the database file is created if missing.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        if let Some(dir) = config.database_path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }

        tracing::info!(path = %config.database_path.display(), "opening database");

        let conn = Connection::open(&config.database_path)?;
        Self::configure(conn, config)
    }

    /// Open (or create) a database at an explicit path with default settings.
    pub fn open_at(path: &Path) -> Result<Self> {
        let config = StoreConfig {
            database_path: path.to_path_buf(),
            ..StoreConfig::default()
        };
        Self::open(&config)
    }

    /// Open a private in-memory database.  Mostly useful in tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::configure(conn, &StoreConfig::default())
    }

    fn configure(conn: Connection, config: &StoreConfig) -> Result<Self> {
        conn.pragma_update(None, "journal_mode", &config.journal_mode)?;
        conn.pragma_update(None, "foreign_keys", config.foreign_keys)?;
        conn.busy_timeout(config.busy_timeout)?;

        Ok(Self { conn })
    }

    /// Apply every migration in `registry` that the ledger has not seen.
    pub fn migrate(&mut self, registry: &Registry) -> Result<MigrateReport> {
        let report = registry.migrate(self)?;

        tracing::info!(
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            "database schema up to date"
        );

        Ok(report)
    }

    /// Whether a table called `name` exists.
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Return a reference to the underlying `rusqlite::Connection`.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Return a mutable reference to the underlying connection.
    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }
}

impl Executor for Database {
    type Error = StoreError;

    fn execute(&mut self, command: &str, params: &[Version]) -> Result<u64> {
        let affected = self.conn.execute(command, params_from_iter(params))?;
        Ok(affected as u64)
    }

    fn count(&mut self, command: &str, params: &[Version]) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row(command, params_from_iter(params), |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    fn execute_atomic(&mut self, script: &str) -> Result<()> {
        // Dropping the transaction without committing rolls it back.
        let tx = self.conn.transaction()?;
        tx.execute_batch(script)?;
        tx.commit()?;
        Ok(())
    }
}
