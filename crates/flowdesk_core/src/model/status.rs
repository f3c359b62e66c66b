//! Lifecycle status shared by projects and flows.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Two-state lifecycle flag.
///
/// Persisted as the literal strings `active` / `inactive`; changing those
/// values requires a data migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

impl Status {
    /// Returns the persisted literal for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Parses a persisted literal. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    /// Returns the opposite status.
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Status;

    #[test]
    fn parse_accepts_only_exact_literals() {
        assert_eq!(Status::parse("active"), Some(Status::Active));
        assert_eq!(Status::parse("inactive"), Some(Status::Inactive));
        assert_eq!(Status::parse("Active"), None);
        assert_eq!(Status::parse(" active"), None);
    }

    #[test]
    fn toggled_flips_both_ways() {
        assert_eq!(Status::Active.toggled(), Status::Inactive);
        assert_eq!(Status::Inactive.toggled(), Status::Active);
    }
}
