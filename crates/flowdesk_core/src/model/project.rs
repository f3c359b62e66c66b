//! Project entity.
//!
//! # Responsibility
//! - Hold the top-level grouping record that owns flows.
//! - Provide activate/deactivate lifecycle helpers.
//!
//! # Invariants
//! - `id` is `None` until storage assigns one, and immutable afterwards.
//! - Name validation is the caller's responsibility.

use crate::model::current_timestamp;
use crate::model::status::Status;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Storage-assigned project identifier.
pub type ProjectId = i64;

/// Top-level grouping entity owning zero or more flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<ProjectId>,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub status: Status,
}

impl Project {
    /// Creates an unsaved, active project stamped with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            created_at: current_timestamp(),
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
