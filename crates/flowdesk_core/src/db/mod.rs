//! Storage layer for projects and flows.
//!
//! # Responsibility
//! - Hand out SQLite connections that already carry the FlowDesk schema.
//! - Own the `Database` handle that shells keep for the process lifetime.
//!
//! # Invariants
//! - Every returned connection enforces foreign keys, so deleting a project
//!   cascades to its flows.
//! - A database stamped with a newer `user_version` than this binary knows is
//!   refused.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod handle;
pub mod migrations;
mod open;

pub use handle::{Database, DbLocation};
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the store.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer FlowDesk build.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "store schema v{found} is ahead of this build (max v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
