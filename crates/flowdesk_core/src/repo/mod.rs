//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define storage-agnostic data access contracts for projects and flows.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `MissingId`) in
//!   addition to DB transport errors.
//! - SQLite repositories only accept connections with the latest schema.

pub mod flow_repo;
pub mod project_repo;

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Persisted timestamp layout. Six fractional digits keep text ordering
/// consistent with time ordering.
const TIMESTAMP_WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
const TIMESTAMP_READ_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity family named in not-found style errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    Flow,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Flow => "flow",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository error shared by project and flow persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// No row matches the given identifier.
    NotFound { entity: EntityKind, id: i64 },
    /// Update requested for an entity that was never persisted.
    MissingId(EntityKind),
    /// Persisted row cannot be decoded into a valid entity.
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Returns true for the not-found class (`NotFound` and `MissingId`).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::MissingId(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::MissingId(entity) => write!(f, "{entity} has no identifier; persist it first"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_WRITE_FORMAT).to_string()
}

pub(crate) fn parse_timestamp(value: &str, column: &str) -> RepoResult<NaiveDateTime> {
    TIMESTAMP_READ_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| RepoError::InvalidData(format!("invalid timestamp `{value}` in {column}")))
}

/// Verifies that `conn` is migrated and carries `table` with `columns`.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, parse_timestamp, RepoError};
    use chrono::NaiveDate;

    #[test]
    fn timestamp_text_round_trips_with_microseconds() {
        let value = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|date| date.and_hms_micro_opt(7, 5, 1, 42))
            .expect("valid datetime");
        let text = format_timestamp(&value);
        assert_eq!(text, "2024-03-09T07:05:01.000042");
        assert_eq!(parse_timestamp(&text, "projects.created_at").unwrap(), value);
    }

    #[test]
    fn parse_timestamp_accepts_legacy_layouts() {
        assert!(parse_timestamp("2024-03-09T07:05:01", "c").is_ok());
        assert!(parse_timestamp("2024-03-09 07:05:01.5", "c").is_ok());
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        let err = parse_timestamp("09/03/2024", "flows.created_at").unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(ref msg) if msg.contains("flows.created_at")));
    }
}
