//! Flow use-cases for presentation shells.

use crate::model::flow::{Flow, FlowId, Recurrence};
use crate::model::project::ProjectId;
use crate::model::status::Status;
use crate::repo::flow_repo::FlowRepository;
use crate::repo::EntityKind;
use crate::service::flow_service::FlowService;
use crate::usecase::{format_display_date, require_text, DisplayRecord, UseCaseError, UseCaseResult};
use log::warn;

/// Raw edit-form values for an existing flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowChanges {
    pub name: String,
    /// One of the recurrence labels, e.g. `Semanal`.
    pub recurrence: String,
    pub owner: String,
    pub is_active: bool,
}

/// Flow operations returning display records.
pub struct FlowUseCases<R: FlowRepository> {
    service: FlowService<R>,
}

impl<R: FlowRepository> FlowUseCases<R> {
    pub fn new(service: FlowService<R>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &FlowService<R> {
        &self.service
    }

    /// Lists flows of one project, newest first.
    pub fn list_flows_by_project(
        &self,
        project_id: ProjectId,
    ) -> UseCaseResult<Vec<DisplayRecord>> {
        let flows = self.service.get_flows_by_project(project_id)?;
        Ok(flows.iter().map(format_flow).collect())
    }

    /// Returns one flow, or `None` when it does not exist.
    pub fn get_flow_details(&self, id: FlowId) -> UseCaseResult<Option<DisplayRecord>> {
        let flow = self.service.get_flow_by_id(id)?;
        Ok(flow.as_ref().map(format_flow))
    }

    /// Creates an active flow from raw form input.
    ///
    /// # Errors
    /// - `InvalidInput` for a blank name/owner or an unknown recurrence label.
    /// - `Storage` when `project_id` does not reference a project.
    pub fn add_new_flow(
        &self,
        project_id: ProjectId,
        name: &str,
        recurrence: &str,
        owner: &str,
    ) -> UseCaseResult<DisplayRecord> {
        let (name, recurrence, owner) =
            validate_flow_input(name, recurrence, owner).inspect_err(log_rejected)?;
        let flow = self
            .service
            .create_flow(project_id, name, recurrence, owner)?;
        Ok(format_flow(&flow))
    }

    /// Replaces the editable fields of an existing flow.
    pub fn update_flow(&self, id: FlowId, changes: &FlowChanges) -> UseCaseResult<DisplayRecord> {
        let (name, recurrence, owner) =
            validate_flow_input(&changes.name, &changes.recurrence, &changes.owner)
                .inspect_err(log_rejected)?;
        let mut flow = self
            .service
            .get_flow_by_id(id)?
            .ok_or(UseCaseError::NotFound {
                entity: EntityKind::Flow,
                id,
            })?;

        flow.name = name;
        flow.recurrence = recurrence;
        flow.owner = owner;
        flow.status = if changes.is_active {
            Status::Active
        } else {
            Status::Inactive
        };

        let updated = self.service.update_flow(&flow)?;
        Ok(format_flow(&updated))
    }

    /// Flips the flow status and returns the updated record.
    pub fn change_flow_status(&self, id: FlowId) -> UseCaseResult<DisplayRecord> {
        let flow = self.service.toggle_flow_status(id)?;
        Ok(format_flow(&flow))
    }

    /// Deletes a flow. Returns whether it existed.
    pub fn remove_flow(&self, id: FlowId) -> UseCaseResult<bool> {
        Ok(self.service.delete_flow(id)?)
    }
}

/// Parses a raw recurrence label.
///
/// # Errors
/// - `InvalidInput` when `value` is not exactly one of the four labels.
pub fn parse_recurrence(value: &str) -> UseCaseResult<Recurrence> {
    Recurrence::parse_label(value).ok_or_else(|| {
        let expected = Recurrence::ALL.map(Recurrence::label).join("|");
        UseCaseError::invalid(
            "recurrence",
            format!("unknown recurrence `{value}`; expected {expected}"),
        )
    })
}

/// Converts a flow into its display record.
pub fn format_flow(flow: &Flow) -> DisplayRecord {
    let mut record = DisplayRecord::new();
    if let Some(id) = flow.id {
        record.insert("id", id.into());
    }
    record.insert("project_id", flow.project_id.into());
    record.insert("name", flow.name.as_str().into());
    record.insert("recurrence", flow.recurrence.label().into());
    record.insert("created_at", format_display_date(&flow.created_at).into());
    record.insert("owner", flow.owner.as_str().into());
    record.insert("status", flow.status.as_str().into());
    record.insert("is_active", flow.is_active().into());
    record
}

fn validate_flow_input(
    name: &str,
    recurrence: &str,
    owner: &str,
) -> UseCaseResult<(String, Recurrence, String)> {
    let name = require_text("name", name)?;
    let owner = require_text("owner", owner)?;
    let recurrence = parse_recurrence(recurrence)?;
    Ok((name, recurrence, owner))
}

fn log_rejected(err: &UseCaseError) {
    if let UseCaseError::InvalidInput { field, .. } = err {
        warn!("event=input_rejected module=usecase entity=flow field={field}");
    }
}
