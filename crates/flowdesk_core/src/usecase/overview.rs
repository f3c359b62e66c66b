//! Read-only project overview for export collaborators.
//!
//! Diagram and report exporters need a project together with its flows; this
//! module loads both without exposing repositories or allowing writes.

use crate::model::flow::Flow;
use crate::model::project::{Project, ProjectId};
use crate::repo::flow_repo::FlowRepository;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::EntityKind;
use crate::service::flow_service::FlowService;
use crate::service::project_service::ProjectService;
use crate::usecase::{UseCaseError, UseCaseResult};
use serde::Serialize;

/// A project and the flows it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectOverview {
    pub project: Project,
    /// Newest first.
    pub flows: Vec<Flow>,
}

impl ProjectOverview {
    pub fn active_flow_count(&self) -> usize {
        self.flows.iter().filter(|flow| flow.is_active()).count()
    }
}

/// Loads `project_id` with its flows.
///
/// # Errors
/// - `NotFound` when the project does not exist.
pub fn project_overview<P: ProjectRepository, F: FlowRepository>(
    projects: &ProjectService<P>,
    flows: &FlowService<F>,
    project_id: ProjectId,
) -> UseCaseResult<ProjectOverview> {
    let project = projects
        .get_project_by_id(project_id)?
        .ok_or(UseCaseError::NotFound {
            entity: EntityKind::Project,
            id: project_id,
        })?;
    let flows = flows.get_flows_by_project(project_id)?;
    Ok(ProjectOverview { project, flows })
}
