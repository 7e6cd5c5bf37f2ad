//! Periodic dispatcher that drains the queue and sends one digest per group.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, trace};

use crate::dedup::DedupFilter;
use crate::delivery::DeliveryChannel;
use crate::formatter::DigestFormatter;
use crate::grouping;
use crate::metrics::NotificationMetrics;
use crate::queue::NotificationQueue;

/// What the dispatcher is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    /// Waiting for the next tick.
    Idle,
    /// Draining, grouping, and sending.
    Dispatching,
}

/// Outcome of a single dispatch cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    /// Entries drained from the queue.
    pub drained: usize,
    /// Digests built from those entries.
    pub groups: usize,
    /// Digests the channel accepted.
    pub sent: usize,
    /// Digests the channel rejected. Their entries are gone.
    pub failed: usize,
}

impl CycleReport {
    /// Whether the cycle found nothing to do.
    pub fn is_empty(&self) -> bool {
        self.drained == 0
    }
}

/// Drains the notification queue on a fixed period and hands each digest to
/// the delivery channel.
///
/// A failed send is logged and counted; it neither stops the remaining
/// groups nor puts entries back on the queue.
#[derive(Debug)]
pub struct NotificationDispatcher {
    /// Pending entries.
    queue: Arc<NotificationQueue>,
    /// Dedup filter, pruned once per cycle.
    dedup: Arc<DedupFilter>,
    /// Outbound transport.
    channel: Arc<dyn DeliveryChannel>,
    /// Digest renderer.
    formatter: DigestFormatter,
    /// Engine counters.
    metrics: Arc<NotificationMetrics>,
    /// Time between cycles.
    interval: Duration,
    /// Cycles currently in progress. A manual flush may overlap a tick.
    in_flight: AtomicUsize,
}

/// Counts one in-flight cycle and releases it on drop, including when the
/// cycle future is dropped mid-send.
struct DispatchingGuard<'a>(&'a AtomicUsize);

impl<'a> DispatchingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for DispatchingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl NotificationDispatcher {
    /// Create a new dispatcher
    pub fn new(
        queue: Arc<NotificationQueue>,
        dedup: Arc<DedupFilter>,
        channel: Arc<dyn DeliveryChannel>,
        formatter: DigestFormatter,
        metrics: Arc<NotificationMetrics>,
        interval: Duration,
    ) -> Self {
        Self {
            queue,
            dedup,
            channel,
            formatter,
            metrics,
            interval,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Current state. `Dispatching` while any cycle is still running.
    pub fn state(&self) -> DispatcherState {
        if self.in_flight.load(Ordering::Acquire) > 0 {
            DispatcherState::Dispatching
        } else {
            DispatcherState::Idle
        }
    }

    /// Run one drain → group → send cycle.
    pub async fn run_cycle(&self) -> CycleReport {
        let _guard = DispatchingGuard::enter(&self.in_flight);

        let pruned = self.dedup.prune();
        if pruned > 0 {
            debug!("Pruned {} expired dedup keys", pruned);
        }

        let entries = self.queue.drain_all();
        if entries.is_empty() {
            trace!("Notification queue empty, nothing to dispatch");
            return CycleReport::default();
        }

        let drained = entries.len();
        let groups = grouping::group(entries);
        let mut report = CycleReport {
            drained,
            groups: groups.len(),
            ..CycleReport::default()
        };

        info!(
            "Dispatching {} notifications in {} digests via {}",
            drained,
            groups.len(),
            self.channel.channel_type()
        );

        for group in &groups {
            let message = self.formatter.render(group);
            match self.channel.send(&group.recipient_email, &message).await {
                Ok(()) => {
                    report.sent += 1;
                    info!(
                        "Digest sent to {} ({} priority, {} lines)",
                        group.recipient_email,
                        group.priority,
                        group.len()
                    );
                }
                Err(e) => {
                    report.failed += 1;
                    error!(
                        "Failed to send digest to {} ({} priority, {} lines dropped): {}",
                        group.recipient_email,
                        group.priority,
                        group.len(),
                        e
                    );
                }
            }
        }

        self.metrics.record_cycle(report.sent as u64, report.failed as u64);

        info!(
            "Dispatch cycle complete: sent={}, failed={}",
            report.sent, report.failed
        );
        report
    }

    /// Run until the shutdown signal flips to `true` (or its sender is
    /// dropped), then flush once more.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Notification dispatcher started (interval={}s, channel={})",
            self.interval.as_secs(),
            self.channel.channel_type()
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Notification dispatcher received shutdown signal");
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.run_cycle().await;
                }
            }
        }

        let report = self.run_cycle().await;
        if !report.is_empty() {
            info!("Final flush: sent={}, failed={}", report.sent, report.failed);
        }

        info!("Notification dispatcher stopped");
    }

    /// Spawn [`NotificationDispatcher::run`] on the runtime.
    pub fn spawn(self: Arc<Self>, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }
}
