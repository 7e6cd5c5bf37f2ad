//! User entity model.

use serde::{Deserialize, Serialize};

use incidenthub_core::types::id::UserId;

/// A user who can receive notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Delivery address.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
}

impl User {
    /// Create a user record.
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name: None,
        }
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
