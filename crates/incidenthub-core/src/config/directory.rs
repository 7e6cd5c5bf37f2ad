//! Seed data for the in-memory user directory.

use serde::{Deserialize, Serialize};

use crate::types::id::UserId;

/// Users known to the standalone server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Users loaded at startup.
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

/// A single seeded user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    /// User identifier.
    pub id: UserId,
    /// Delivery address.
    pub email: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}
