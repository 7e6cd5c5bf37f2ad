//! Incident priority levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Priority of an incident. Also the digest grouping tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentPriority {
    /// Can wait.
    #[default]
    Low,
    /// Default working priority.
    Medium,
    /// Needs attention now.
    High,
}

impl IncidentPriority {
    /// Return the priority as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Accent colour used in HTML digests.
    pub fn accent_color(&self) -> &'static str {
        match self {
            Self::Low => "#22c55e",
            Self::Medium => "#f97316",
            Self::High => "#ef4444",
        }
    }
}

impl fmt::Display for IncidentPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IncidentPriority {
    type Err = incidenthub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(incidenthub_core::AppError::validation(format!(
                "Invalid incident priority: '{s}'. Expected one of: low, medium, high"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("HIGH".parse::<IncidentPriority>().unwrap(), IncidentPriority::High);
        assert_eq!(" medium ".parse::<IncidentPriority>().unwrap(), IncidentPriority::Medium);
    }

    #[test]
    fn test_unknown_priority_rejected() {
        let err = "urgent".parse::<IncidentPriority>().unwrap_err();
        assert_eq!(err.kind, incidenthub_core::error::ErrorKind::Validation);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&IncidentPriority::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
