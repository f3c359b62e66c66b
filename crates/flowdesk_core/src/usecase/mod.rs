//! Use-case layer between a presentation shell and domain services.
//!
//! # Responsibility
//! - Validate raw user input before it reaches services or storage.
//! - Convert entities into flat `DisplayRecord`s for rendering.
//! - Translate service results into the three caller-facing error kinds.
//!
//! # Invariants
//! - Rejected input never triggers a repository call.
//! - Detail lookups report a missing entity as `None`, not as an error.

pub mod flow_use_cases;
pub mod overview;
pub mod project_use_cases;

use crate::repo::{EntityKind, RepoError};
use crate::service::ServiceError;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Date layout used in display records (day/month/year).
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Flat field-name to value mapping handed to presentation shells.
pub type DisplayRecord = BTreeMap<&'static str, FieldValue>;

pub type UseCaseResult<T> = Result<T, UseCaseError>;

/// Primitive value inside a `DisplayRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    Bool(bool),
}

impl FieldValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Caller-facing error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    StorageFailure,
}

/// Error returned by use-case operations.
#[derive(Debug)]
pub enum UseCaseError {
    /// Malformed field value, rejected before any repository call.
    InvalidInput {
        field: &'static str,
        message: String,
    },
    NotFound {
        entity: EntityKind,
        id: i64,
    },
    /// Update of an entity that was never persisted.
    MissingId(EntityKind),
    /// Storage failure passed through unchanged.
    Storage(RepoError),
}

impl UseCaseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::NotFound { .. } | Self::MissingId(_) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::StorageFailure,
        }
    }

    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }
}

impl Display for UseCaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => write!(f, "invalid {field}: {message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::MissingId(entity) => write!(f, "{entity} not found: no identifier assigned"),
            Self::Storage(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl Error for UseCaseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ServiceError> for UseCaseError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::NotFound { entity, id } => Self::NotFound { entity, id },
            ServiceError::MissingId(entity) => Self::MissingId(entity),
            ServiceError::Repo(err) => Self::Storage(err),
        }
    }
}

/// Formats a creation timestamp for display.
pub fn format_display_date(value: &NaiveDateTime) -> String {
    value.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Returns `value` trimmed, or `InvalidInput` when it is blank.
fn require_text(field: &'static str, value: &str) -> UseCaseResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(UseCaseError::invalid(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}
