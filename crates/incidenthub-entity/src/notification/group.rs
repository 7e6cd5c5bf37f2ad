//! Per-recipient, per-priority digest.

use serde::{Deserialize, Serialize};

use incidenthub_core::types::id::UserId;

use crate::incident::IncidentPriority;

/// All pending lines for one `(recipient, priority)` pair.
///
/// Built fresh on every dispatch cycle and dropped once sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationGroup {
    /// Recipient the digest is for.
    pub recipient_id: UserId,
    /// Delivery address.
    pub recipient_email: String,
    /// Priority tier of every line in the digest.
    pub priority: IncidentPriority,
    /// Lines in enqueue order.
    pub lines: Vec<String>,
}

impl NotificationGroup {
    /// Start an empty digest.
    pub fn new(recipient_id: UserId, recipient_email: impl Into<String>, priority: IncidentPriority) -> Self {
        Self {
            recipient_id,
            recipient_email: recipient_email.into(),
            priority,
            lines: Vec::new(),
        }
    }

    /// Number of folded entries.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no entries have been folded in yet.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
