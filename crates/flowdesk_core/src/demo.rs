//! Demo data for first-run exploration.
//!
//! Seeds one active project with two daily flows and one inactive project.
//! Seeding always inserts; callers decide whether the store is empty enough.

use crate::model::flow::{Flow, FlowId, Recurrence};
use crate::model::project::{Project, ProjectId};
use crate::repo::flow_repo::{FlowRepository, SqliteFlowRepository};
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::{EntityKind, RepoError, RepoResult};
use log::info;
use rusqlite::Connection;

const DEMO_OWNER: &str = "Sebastián De la Torre";

/// Identifiers created by [`seed_demo_data`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSeed {
    pub active_project: ProjectId,
    pub inactive_project: ProjectId,
    pub flows: Vec<FlowId>,
}

/// Inserts the demo projects and flows.
pub fn seed_demo_data(conn: &Connection) -> RepoResult<DemoSeed> {
    let projects = SqliteProjectRepository::try_new(conn)?;
    let flow_repo = SqliteFlowRepository::try_new(conn)?;

    let active_project = persisted_id(
        projects.create(&Project::new("Proyecto XYZ"))?.id,
        EntityKind::Project,
    )?;

    let mut flows = Vec::new();
    for name in ["Mandar Forms TC Share Point", "Reminder Teams"] {
        let flow = flow_repo.create(&Flow::new(
            active_project,
            name,
            Recurrence::Daily,
            DEMO_OWNER,
        ))?;
        flows.push(persisted_id(flow.id, EntityKind::Flow)?);
    }

    let mut inactive = Project::new("Proyecto ABC");
    inactive.deactivate();
    let inactive_project = persisted_id(projects.create(&inactive)?.id, EntityKind::Project)?;

    info!(
        "event=demo_seed module=demo status=ok projects=2 flows={}",
        flows.len()
    );
    Ok(DemoSeed {
        active_project,
        inactive_project,
        flows,
    })
}

fn persisted_id(id: Option<i64>, entity: EntityKind) -> RepoResult<i64> {
    id.ok_or(RepoError::MissingId(entity))
}
