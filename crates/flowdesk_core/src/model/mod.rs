//! Project/flow domain model.
//!
//! # Responsibility
//! - Define the entities persisted by core: `Project` and its owned `Flow`s.
//! - Define the shared two-state `Status` lifecycle and flow `Recurrence`.
//!
//! # Invariants
//! - Identifiers are assigned by storage and never change afterwards.
//! - A flow belongs to exactly one project for its whole lifetime.

pub mod flow;
pub mod project;
pub mod status;

use chrono::{Local, NaiveDateTime, SubsecRound};

/// Returns the current local wall-clock time at microsecond precision.
///
/// Storage keeps six fractional digits, so entities created with this value
/// read back unchanged.
pub fn current_timestamp() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}
