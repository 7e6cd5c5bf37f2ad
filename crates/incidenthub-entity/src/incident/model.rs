//! Incident entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use incidenthub_core::types::id::{IncidentId, UserId};

use super::priority::IncidentPriority;
use super::status::IncidentStatus;

/// A tracked incident as seen by the notification engine.
///
/// Only the fields that drive recipient resolution and digest rendering
/// are carried here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    /// Unique incident identifier.
    pub id: IncidentId,
    /// Short human-readable title.
    pub title: String,
    /// Current priority.
    pub priority: IncidentPriority,
    /// Current lifecycle status.
    pub status: IncidentStatus,
    /// The user who opened the incident.
    pub created_by: Option<UserId>,
    /// The user currently responsible for the incident.
    pub assigned_to: Option<UserId>,
    /// When the incident was created.
    pub created_at: DateTime<Utc>,
}

impl Incident {
    /// Create a new open, unassigned incident.
    pub fn new(title: impl Into<String>, priority: IncidentPriority, created_by: UserId) -> Self {
        Self {
            id: IncidentId::new(),
            title: title.into(),
            priority,
            status: IncidentStatus::Open,
            created_by: Some(created_by),
            assigned_to: None,
            created_at: Utc::now(),
        }
    }

    /// Identifiers of every user with a stake in this incident, without
    /// duplicates. Creator first.
    pub fn stakeholder_ids(&self) -> Vec<UserId> {
        let mut ids = Vec::with_capacity(2);
        for id in [self.created_by, self.assigned_to].into_iter().flatten() {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }
}
