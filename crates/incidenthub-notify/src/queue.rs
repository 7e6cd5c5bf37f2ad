//! In-memory queue of pending notifications.

use std::sync::Mutex;

use incidenthub_entity::notification::NotificationEntry;

/// Append-only buffer filled by producers and emptied by the dispatcher.
///
/// Unbounded: entries are small and drained every flush interval. A stalled
/// delivery channel does not stall draining, since entries leave the queue
/// before any send is attempted.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    entries: Mutex<Vec<NotificationEntry>>,
}

impl NotificationQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the tail.
    pub fn enqueue(&self, entry: NotificationEntry) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.push(entry);
    }

    /// Remove and return everything queued, oldest first.
    ///
    /// An entry enqueued concurrently lands either in this batch or in the
    /// next one, never both.
    pub fn drain_all(&self) -> Vec<NotificationEntry> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *entries)
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
