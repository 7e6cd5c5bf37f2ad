//! Notification engine counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Engine-level metrics counters.
#[derive(Debug, Default)]
pub struct NotificationMetrics {
    /// Entries appended to the queue
    pub enqueued: AtomicU64,
    /// Producer notifications suppressed by the dedup filter
    pub deduplicated: AtomicU64,
    /// Digests accepted by the delivery channel
    pub sent: AtomicU64,
    /// Digests the delivery channel rejected
    pub failed: AtomicU64,
    /// Dispatch cycles that found work
    pub cycles: AtomicU64,
    /// Recipient lookups that errored
    pub lookup_errors: AtomicU64,
}

impl NotificationMetrics {
    /// Create new zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an enqueued entry
    pub fn record_enqueued(&self) {
        self.enqueued.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a deduplicated notification
    pub fn record_deduplicated(&self) {
        self.deduplicated.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup failure
    pub fn record_lookup_error(&self) {
        self.lookup_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of one dispatch cycle
    pub fn record_cycle(&self, sent: u64, failed: u64) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
        self.sent.fetch_add(sent, Ordering::Relaxed);
        self.failed.fetch_add(failed, Ordering::Relaxed);
    }

    /// Get a snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            deduplicated: self.deduplicated.load(Ordering::Relaxed),
            sent: self.sent.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            cycles: self.cycles.load(Ordering::Relaxed),
            lookup_errors: self.lookup_errors.load(Ordering::Relaxed),
        }
    }
}

/// Serializable metrics snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Entries appended to the queue
    pub enqueued: u64,
    /// Producer notifications suppressed by the dedup filter
    pub deduplicated: u64,
    /// Digests accepted by the delivery channel
    pub sent: u64,
    /// Digests the delivery channel rejected
    pub failed: u64,
    /// Dispatch cycles that found work
    pub cycles: u64,
    /// Recipient lookups that errored
    pub lookup_errors: u64,
}
