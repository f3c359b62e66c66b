//! Long-lived storage handle.
//!
//! # Responsibility
//! - Own the single SQLite connection used by repositories.
//! - Open it lazily on first use and close it explicitly on shutdown.
//!
//! # Invariants
//! - At most one connection is open per handle.
//! - A closed handle reopens (and re-checks migrations) on the next use.

use super::open::{open_db, open_db_in_memory};
use super::DbResult;
use log::info;
use once_cell::unsync::OnceCell;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Where a `Database` handle stores its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

/// Process-lifetime storage handle.
///
/// Repositories borrow the connection returned by [`Database::connection`],
/// so the borrow checker keeps them from outliving a `close`.
#[derive(Debug)]
pub struct Database {
    location: DbLocation,
    conn: OnceCell<Connection>,
}

impl Database {
    /// Creates a handle for a database file. Nothing is opened yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            location: DbLocation::File(path.into()),
            conn: OnceCell::new(),
        }
    }

    /// Creates a handle for a private in-memory database.
    ///
    /// Data does not survive `close`.
    pub fn in_memory() -> Self {
        Self {
            location: DbLocation::Memory,
            conn: OnceCell::new(),
        }
    }

    pub fn location(&self) -> &DbLocation {
        &self.location
    }

    /// Returns the file path for file-backed handles.
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            DbLocation::File(path) => Some(path.as_path()),
            DbLocation::Memory => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    /// Returns the shared connection, opening and migrating it on first use.
    pub fn connection(&self) -> DbResult<&Connection> {
        self.conn.get_or_try_init(|| match &self.location {
            DbLocation::File(path) => open_db(path),
            DbLocation::Memory => open_db_in_memory(),
        })
    }

    /// Closes the connection if open. Idempotent.
    pub fn close(&mut self) -> DbResult<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, err)| err)?;
            info!("event=db_close module=db status=ok");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Database;

    #[test]
    fn connection_opens_lazily_and_close_is_idempotent() {
        let mut db = Database::in_memory();
        assert!(!db.is_open());

        db.connection().expect("in-memory db should open");
        assert!(db.is_open());

        db.close().expect("first close should succeed");
        assert!(!db.is_open());
        db.close().expect("second close should be a no-op");
    }

    #[test]
    fn connection_returns_same_handle_on_repeat_calls() {
        let db = Database::in_memory();
        let first = db.connection().expect("open") as *const _;
        let second = db.connection().expect("reuse") as *const _;
        assert_eq!(first, second);
    }
}
