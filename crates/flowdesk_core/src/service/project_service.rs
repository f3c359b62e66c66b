//! Project use-case service.

use crate::model::project::{Project, ProjectId};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::EntityKind;
use crate::service::{ServiceError, ServiceResult};
use log::info;

/// Service wrapper over a project repository.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all projects, newest first.
    pub fn get_all_projects(&self) -> ServiceResult<Vec<Project>> {
        Ok(self.repo.get_all()?)
    }

    pub fn get_project_by_id(&self, id: ProjectId) -> ServiceResult<Option<Project>> {
        Ok(self.repo.get_by_id(id)?)
    }

    /// Creates an active project stamped with the current time.
    pub fn create_project(&self, name: impl Into<String>) -> ServiceResult<Project> {
        let project = self.repo.create(&Project::new(name))?;
        info!(
            "event=project_create module=service status=ok project_id={}",
            project.id.unwrap_or_default()
        );
        Ok(project)
    }

    /// Persists name/status changes. Missing rows surface as `NotFound`.
    pub fn update_project(&self, project: &Project) -> ServiceResult<Project> {
        Ok(self.repo.update(project)?)
    }

    /// Deletes a project and, by cascade, its flows.
    pub fn delete_project(&self, id: ProjectId) -> ServiceResult<bool> {
        let removed = self.repo.delete(id)?;
        info!("event=project_delete module=service status=ok project_id={id} removed={removed}");
        Ok(removed)
    }

    /// Flips the project between active and inactive.
    ///
    /// # Errors
    /// - `NotFound` when no project has `id`; nothing is written.
    pub fn toggle_project_status(&self, id: ProjectId) -> ServiceResult<Project> {
        let mut project = self
            .repo
            .get_by_id(id)?
            .ok_or(ServiceError::NotFound {
                entity: EntityKind::Project,
                id,
            })?;

        if project.is_active() {
            project.deactivate();
        } else {
            project.activate();
        }

        let updated = self.repo.update(&project)?;
        info!(
            "event=project_toggle module=service status=ok project_id={id} new_status={}",
            updated.status
        );
        Ok(updated)
    }
}
