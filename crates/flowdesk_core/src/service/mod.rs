//! Domain services.
//!
//! # Responsibility
//! - Orchestrate repository calls into entity-level operations.
//! - Enforce "entity must exist" before status toggles.
//!
//! # Invariants
//! - Services never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

pub mod flow_service;
pub mod project_service;

use crate::repo::{EntityKind, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for project/flow operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Target entity does not exist.
    NotFound { entity: EntityKind, id: i64 },
    /// Entity was never persisted, so there is nothing to update.
    MissingId(EntityKind),
    /// Persistence-layer failure, passed through unchanged.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::MissingId(entity) => write!(f, "{entity} not found: no identifier assigned"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NotFound { .. } | Self::MissingId(_) => None,
        }
    }
}

impl ServiceError {
    /// Returns true for `NotFound` and `MissingId`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::MissingId(_))
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::MissingId(entity) => Self::MissingId(entity),
            other => Self::Repo(other),
        }
    }
}
