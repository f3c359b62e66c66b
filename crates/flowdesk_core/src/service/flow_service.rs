//! Flow use-case service.

use crate::model::flow::{Flow, FlowId, Recurrence};
use crate::model::project::ProjectId;
use crate::repo::flow_repo::FlowRepository;
use crate::repo::EntityKind;
use crate::service::{ServiceError, ServiceResult};
use log::info;

/// Service wrapper over a flow repository.
pub struct FlowService<R: FlowRepository> {
    repo: R,
}

impl<R: FlowRepository> FlowService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists flows owned by `project_id`, newest first.
    pub fn get_flows_by_project(&self, project_id: ProjectId) -> ServiceResult<Vec<Flow>> {
        Ok(self.repo.get_all_by_project(project_id)?)
    }

    pub fn get_all_flows(&self) -> ServiceResult<Vec<Flow>> {
        Ok(self.repo.get_all()?)
    }

    pub fn get_flow_by_id(&self, id: FlowId) -> ServiceResult<Option<Flow>> {
        Ok(self.repo.get_by_id(id)?)
    }

    /// Creates an active flow under `project_id`.
    ///
    /// An unknown `project_id` fails with a storage error from the foreign key.
    pub fn create_flow(
        &self,
        project_id: ProjectId,
        name: impl Into<String>,
        recurrence: Recurrence,
        owner: impl Into<String>,
    ) -> ServiceResult<Flow> {
        let flow = self
            .repo
            .create(&Flow::new(project_id, name, recurrence, owner))?;
        info!(
            "event=flow_create module=service status=ok flow_id={} project_id={project_id}",
            flow.id.unwrap_or_default()
        );
        Ok(flow)
    }

    pub fn update_flow(&self, flow: &Flow) -> ServiceResult<Flow> {
        Ok(self.repo.update(flow)?)
    }

    pub fn delete_flow(&self, id: FlowId) -> ServiceResult<bool> {
        let removed = self.repo.delete(id)?;
        info!("event=flow_delete module=service status=ok flow_id={id} removed={removed}");
        Ok(removed)
    }

    /// Flips the flow between active and inactive.
    ///
    /// # Errors
    /// - `NotFound` when no flow has `id`; nothing is written.
    pub fn toggle_flow_status(&self, id: FlowId) -> ServiceResult<Flow> {
        let mut flow = self.repo.get_by_id(id)?.ok_or(ServiceError::NotFound {
            entity: EntityKind::Flow,
            id,
        })?;

        if flow.is_active() {
            flow.deactivate();
        } else {
            flow.activate();
        }

        let updated = self.repo.update(&flow)?;
        info!(
            "event=flow_toggle module=service status=ok flow_id={id} new_status={}",
            updated.status
        );
        Ok(updated)
    }
}
