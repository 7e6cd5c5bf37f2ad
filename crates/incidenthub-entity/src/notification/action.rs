//! Why a notification fired.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The incident lifecycle event behind a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// The incident was opened.
    Created,
    /// The incident was handed to a new assignee.
    Assigned,
    /// The incident's status or priority changed.
    Updated,
}

impl ActionKind {
    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Assigned => "assigned",
            Self::Updated => "updated",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
