//! Queued notification entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use incidenthub_core::types::id::{IncidentId, UserId};

use super::action::ActionKind;
use crate::incident::{Incident, IncidentPriority};
use crate::user::User;

/// One unit of pending notification work.
///
/// Recipient address, priority and title are snapshots taken at enqueue
/// time so a later edit to the user or incident does not change what gets
/// sent. Entries are never mutated after they are queued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEntry {
    /// The user to notify.
    pub recipient_id: UserId,
    /// Where to deliver.
    pub recipient_email: String,
    /// The incident this is about.
    pub incident_id: IncidentId,
    /// Incident priority when queued.
    pub priority: IncidentPriority,
    /// Incident title when queued.
    pub title: String,
    /// What happened.
    pub action: ActionKind,
    /// When the entry was queued. Diagnostics only.
    pub enqueued_at: DateTime<Utc>,
}

impl NotificationEntry {
    /// Snapshot a notification for `recipient` about `incident`.
    pub fn new(recipient: &User, incident: &Incident, action: ActionKind) -> Self {
        Self {
            recipient_id: recipient.id,
            recipient_email: recipient.email.clone(),
            incident_id: incident.id,
            priority: incident.priority,
            title: incident.title.clone(),
            action,
            enqueued_at: Utc::now(),
        }
    }

    /// The digest line for this entry: `"<action>: <title>"`.
    pub fn line(&self) -> String {
        format!("{}: {}", self.action, self.title)
    }
}
