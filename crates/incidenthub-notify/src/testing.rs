//! Fakes shared by unit tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use incidenthub_core::error::AppError;
use incidenthub_core::result::AppResult;
use incidenthub_core::types::id::{IncidentId, UserId};
use incidenthub_entity::incident::IncidentPriority;
use incidenthub_entity::notification::{ActionKind, NotificationEntry};
use incidenthub_entity::user::User;

use crate::delivery::{DeliveryChannel, OutboundMessage};
use crate::directory::UserDirectory;

/// Entry for a fresh recipient with the given title.
pub fn entry_titled(title: &str, priority: IncidentPriority) -> NotificationEntry {
    entry_for(UserId::new(), priority, ActionKind::Created, title)
}

/// Entry for a specific recipient.
pub fn entry_for(
    recipient_id: UserId,
    priority: IncidentPriority,
    action: ActionKind,
    title: &str,
) -> NotificationEntry {
    NotificationEntry {
        recipient_id,
        recipient_email: format!("{recipient_id}@example.com"),
        incident_id: IncidentId::new(),
        priority,
        title: title.to_string(),
        action,
        enqueued_at: Utc::now(),
    }
}

/// Directory whose every lookup fails.
#[derive(Debug)]
pub struct FailingDirectory;

#[async_trait]
impl UserDirectory for FailingDirectory {
    async fn find_users_by_ids(&self, _ids: &[UserId]) -> AppResult<Vec<User>> {
        Err(AppError::external_service("user store unreachable"))
    }
}

/// Channel that records sends and fails for chosen addresses.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    fail_for: HashSet<String>,
    sent: Mutex<Vec<(String, OutboundMessage)>>,
    attempts: Mutex<usize>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(addresses: &[&str]) -> Self {
        Self {
            fail_for: addresses.iter().map(|a| a.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, OutboundMessage)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl DeliveryChannel for RecordingChannel {
    fn channel_type(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, to: &str, message: &OutboundMessage) -> AppResult<()> {
        *self.attempts.lock().unwrap() += 1;
        if self.fail_for.contains(to) {
            return Err(AppError::delivery(format!("mailbox {to} rejected")));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), message.clone()));
        Ok(())
    }
}
