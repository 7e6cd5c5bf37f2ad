//! Deduplication of notifications per recipient, incident, and action.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use incidenthub_core::types::id::{IncidentId, UserId};
use incidenthub_entity::notification::ActionKind;

/// Identity of "this kind of notification for this user about this incident".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DedupKey {
    /// Recipient.
    pub recipient_id: UserId,
    /// Subject incident.
    pub incident_id: IncidentId,
    /// Why it fired.
    pub action: ActionKind,
}

impl DedupKey {
    /// Build a key from its parts.
    pub fn new(recipient_id: UserId, incident_id: IncidentId, action: ActionKind) -> Self {
        Self {
            recipient_id,
            incident_id,
            action,
        }
    }
}

/// Remembers which notifications already fired.
///
/// With no retention window a key is remembered for the process lifetime.
/// With a window, a key older than the window counts as unseen and is
/// eventually removed by [`DedupFilter::prune`].
#[derive(Debug)]
pub struct DedupFilter {
    /// How long a key suppresses repeats, `None` for forever.
    retention: Option<Duration>,
    /// First-notified time per key.
    seen: Mutex<HashMap<DedupKey, Instant>>,
}

impl DedupFilter {
    /// Create a filter with the given retention window.
    pub fn new(retention: Option<Duration>) -> Self {
        Self {
            retention,
            seen: Mutex::new(HashMap::new()),
        }
    }

    /// Create a filter that never forgets a key.
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Check-and-set: `true` the first time a key is seen (and records it),
    /// `false` for every later call while the key is retained.
    pub fn should_notify(
        &self,
        recipient_id: UserId,
        incident_id: IncidentId,
        action: ActionKind,
    ) -> bool {
        let key = DedupKey::new(recipient_id, incident_id, action);
        let mut seen = self.seen.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();

        if let Some(first) = seen.get(&key) {
            if !self.is_expired(*first, now) {
                return false;
            }
        }

        seen.insert(key, now);
        true
    }

    /// Drop keys older than the retention window. Returns how many were removed.
    pub fn prune(&self) -> usize {
        let Some(retention) = self.retention else {
            return 0;
        };
        let mut seen = self.seen.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let before = seen.len();
        seen.retain(|_, first| now.duration_since(*first) < retention);
        before - seen.len()
    }

    /// Number of keys currently remembered.
    pub fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether no key is remembered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_expired(&self, first: Instant, now: Instant) -> bool {
        match self.retention {
            Some(retention) => now.duration_since(first) >= retention,
            None => false,
        }
    }
}
