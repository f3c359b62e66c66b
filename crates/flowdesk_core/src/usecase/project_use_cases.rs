//! Project use-cases for presentation shells.

use crate::model::project::{Project, ProjectId};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::EntityKind;
use crate::service::project_service::ProjectService;
use crate::usecase::{format_display_date, require_text, DisplayRecord, UseCaseError, UseCaseResult};
use log::warn;

/// Project operations returning display records.
pub struct ProjectUseCases<R: ProjectRepository> {
    service: ProjectService<R>,
}

impl<R: ProjectRepository> ProjectUseCases<R> {
    pub fn new(service: ProjectService<R>) -> Self {
        Self { service }
    }

    /// Borrows the wrapped service for callers that need typed entities.
    pub fn service(&self) -> &ProjectService<R> {
        &self.service
    }

    /// Lists all projects, newest first.
    pub fn list_projects(&self) -> UseCaseResult<Vec<DisplayRecord>> {
        let projects = self.service.get_all_projects()?;
        Ok(projects.iter().map(format_project).collect())
    }

    /// Returns one project, or `None` when it does not exist.
    pub fn get_project_details(&self, id: ProjectId) -> UseCaseResult<Option<DisplayRecord>> {
        let project = self.service.get_project_by_id(id)?;
        Ok(project.as_ref().map(format_project))
    }

    /// Creates an active project.
    ///
    /// # Errors
    /// - `InvalidInput` when `name` is blank; storage is not touched.
    pub fn add_new_project(&self, name: &str) -> UseCaseResult<DisplayRecord> {
        let name = require_text("name", name).inspect_err(log_rejected)?;
        let project = self.service.create_project(name)?;
        Ok(format_project(&project))
    }

    /// Renames an existing project.
    pub fn update_project(&self, id: ProjectId, name: &str) -> UseCaseResult<DisplayRecord> {
        let name = require_text("name", name).inspect_err(log_rejected)?;
        let mut project =
            self.service
                .get_project_by_id(id)?
                .ok_or(UseCaseError::NotFound {
                    entity: EntityKind::Project,
                    id,
                })?;
        project.name = name;
        let updated = self.service.update_project(&project)?;
        Ok(format_project(&updated))
    }

    /// Flips the project status and returns the updated record.
    pub fn change_project_status(&self, id: ProjectId) -> UseCaseResult<DisplayRecord> {
        let project = self.service.toggle_project_status(id)?;
        Ok(format_project(&project))
    }

    /// Deletes a project with its flows. Returns whether it existed.
    pub fn remove_project(&self, id: ProjectId) -> UseCaseResult<bool> {
        Ok(self.service.delete_project(id)?)
    }
}

/// Converts a project into its display record.
pub fn format_project(project: &Project) -> DisplayRecord {
    let mut record = DisplayRecord::new();
    if let Some(id) = project.id {
        record.insert("id", id.into());
    }
    record.insert("name", project.name.as_str().into());
    record.insert("created_at", format_display_date(&project.created_at).into());
    record.insert("status", project.status.as_str().into());
    record.insert("is_active", project.is_active().into());
    record
}

fn log_rejected(err: &UseCaseError) {
    if let UseCaseError::InvalidInput { field, .. } = err {
        warn!("event=input_rejected module=usecase entity=project field={field}");
    }
}
