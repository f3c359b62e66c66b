//! Core domain logic for FlowDesk: projects and the recurring automation
//! flows they own.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod demo;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod usecase;

pub use config::AppConfig;
pub use db::{open_db, open_db_in_memory, Database, DbError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::flow::{Flow, FlowId, Recurrence};
pub use model::project::{Project, ProjectId};
pub use model::status::Status;
pub use repo::flow_repo::{FlowRepository, SqliteFlowRepository};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::{EntityKind, RepoError, RepoResult};
pub use service::flow_service::FlowService;
pub use service::project_service::ProjectService;
pub use service::{ServiceError, ServiceResult};
pub use usecase::flow_use_cases::{FlowChanges, FlowUseCases};
pub use usecase::project_use_cases::ProjectUseCases;
pub use usecase::{DisplayRecord, ErrorKind, FieldValue, UseCaseError, UseCaseResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
