//! Incident lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncidentStatus {
    /// Reported, nobody working on it yet.
    Open,
    /// Being worked on.
    InProgress,
    /// Resolved and closed. Closed incidents no longer change.
    Closed,
}

impl IncidentStatus {
    /// Return the status as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Closed => "closed",
        }
    }

    /// Whether further edits are allowed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IncidentStatus {
    type Err = incidenthub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "in-progress" | "in_progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            _ => Err(incidenthub_core::AppError::validation(format!(
                "Invalid incident status: '{s}'. Expected one of: open, in-progress, closed"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_underscore_alias() {
        assert_eq!(
            "in_progress".parse::<IncidentStatus>().unwrap(),
            IncidentStatus::InProgress
        );
        assert!("resolved".parse::<IncidentStatus>().is_err());
    }

    #[test]
    fn test_only_closed_is_terminal() {
        assert!(IncidentStatus::Closed.is_terminal());
        assert!(!IncidentStatus::InProgress.is_terminal());
    }
}
