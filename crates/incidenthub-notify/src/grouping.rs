//! Folding queued entries into per-recipient, per-priority digests.

use std::collections::HashMap;

use incidenthub_core::types::id::UserId;
use incidenthub_entity::incident::IncidentPriority;
use incidenthub_entity::notification::{NotificationEntry, NotificationGroup};

/// Partition `entries` by `(recipient, priority)` and fold each partition
/// into one [`NotificationGroup`].
///
/// A recipient with pending high and medium entries gets two groups. Lines
/// keep enqueue order within a group; groups come out in the order their
/// key was first seen.
pub fn group(entries: Vec<NotificationEntry>) -> Vec<NotificationGroup> {
    let mut index: HashMap<(UserId, IncidentPriority), usize> = HashMap::new();
    let mut groups: Vec<NotificationGroup> = Vec::new();

    for entry in entries {
        let key = (entry.recipient_id, entry.priority);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(NotificationGroup::new(
                entry.recipient_id,
                entry.recipient_email.clone(),
                entry.priority,
            ));
            groups.len() - 1
        });
        groups[slot].lines.push(entry.line());
    }

    groups
}
