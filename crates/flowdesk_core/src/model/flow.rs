//! Flow entity and recurrence categories.
//!
//! # Responsibility
//! - Hold one recurring automation task owned by a project.
//! - Map `Recurrence` to and from its persisted display label.
//!
//! # Invariants
//! - `project_id` references an existing project; storage enforces this.
//! - Recurrence labels round-trip exactly; they are part of the stored data.

use crate::model::current_timestamp;
use crate::model::project::ProjectId;
use crate::model::status::Status;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned flow identifier.
pub type FlowId = i64;

/// Schedule category for a flow.
///
/// Serialized and persisted as the localized label (`Diaria`, `Semanal`,
/// `Mensual`, `Personalizada`), not as a symbolic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Recurrence {
    #[default]
    #[serde(rename = "Diaria")]
    Daily,
    #[serde(rename = "Semanal")]
    Weekly,
    #[serde(rename = "Mensual")]
    Monthly,
    #[serde(rename = "Personalizada")]
    Custom,
}

impl Recurrence {
    /// All categories in declaration order.
    pub const ALL: [Recurrence; 4] = [
        Recurrence::Daily,
        Recurrence::Weekly,
        Recurrence::Monthly,
        Recurrence::Custom,
    ];

    /// Returns the human-readable label, which is also the persisted value.
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Diaria",
            Self::Weekly => "Semanal",
            Self::Monthly => "Mensual",
            Self::Custom => "Personalizada",
        }
    }

    /// Parses a label. Matching is exact and case-sensitive.
    pub fn parse_label(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|recurrence| recurrence.label() == value)
    }
}

impl Display for Recurrence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Recurring automation task belonging to exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    pub id: Option<FlowId>,
    pub project_id: ProjectId,
    pub name: String,
    pub recurrence: Recurrence,
    pub created_at: NaiveDateTime,
    /// Free-text name of the person responsible for the flow.
    pub owner: String,
    pub status: Status,
}

impl Flow {
    /// Creates an unsaved, active flow under `project_id`.
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        recurrence: Recurrence,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            project_id,
            name: name.into(),
            recurrence,
            created_at: current_timestamp(),
            owner: owner.into(),
            status: Status::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    /// Sets status to `Active`. No-op when already active.
    pub fn activate(&mut self) {
        self.status = Status::Active;
    }

    /// Sets status to `Inactive`. No-op when already inactive.
    pub fn deactivate(&mut self) {
        self.status = Status::Inactive;
    }
}

#[cfg(test)]
mod tests {
    use super::Recurrence;

    #[test]
    fn every_label_parses_back_to_its_variant() {
        for recurrence in Recurrence::ALL {
            assert_eq!(Recurrence::parse_label(recurrence.label()), Some(recurrence));
        }
    }

    #[test]
    fn parse_label_is_case_sensitive() {
        assert_eq!(Recurrence::parse_label("diaria"), None);
        assert_eq!(Recurrence::parse_label("Daily"), None);
        assert_eq!(Recurrence::parse_label(""), None);
    }
}
