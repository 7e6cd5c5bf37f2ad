//! Top-level wiring of the notification engine.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use incidenthub_core::config::NotificationsConfig;

use crate::dedup::DedupFilter;
use crate::delivery::DeliveryChannel;
use crate::directory::UserDirectory;
use crate::dispatcher::{CycleReport, NotificationDispatcher};
use crate::formatter::DigestFormatter;
use crate::metrics::{MetricsSnapshot, NotificationMetrics};
use crate::queue::NotificationQueue;
use crate::resolver::RecipientResolver;
use crate::service::NotificationService;

/// Owns the shared queue and dedup filter and hands out the producer
/// service and the dispatcher that operate on them.
///
/// Built once at startup and shared by `Arc`.
#[derive(Debug, Clone)]
pub struct NotificationEngine {
    /// Producer hooks.
    service: Arc<NotificationService>,
    /// Background flusher.
    dispatcher: Arc<NotificationDispatcher>,
    /// Pending entries.
    queue: Arc<NotificationQueue>,
    /// Notified keys.
    dedup: Arc<DedupFilter>,
    /// Counters.
    metrics: Arc<NotificationMetrics>,
}

impl NotificationEngine {
    /// Create an engine around the given collaborators.
    pub fn new(
        config: &NotificationsConfig,
        directory: Arc<dyn UserDirectory>,
        channel: Arc<dyn DeliveryChannel>,
    ) -> Self {
        let queue = Arc::new(NotificationQueue::new());
        let dedup = Arc::new(DedupFilter::new(config.dedup_retention()));
        let metrics = Arc::new(NotificationMetrics::new());

        let service = Arc::new(NotificationService::new(
            RecipientResolver::new(directory),
            Arc::clone(&dedup),
            Arc::clone(&queue),
            Arc::clone(&metrics),
        ));

        let dispatcher = Arc::new(NotificationDispatcher::new(
            Arc::clone(&queue),
            Arc::clone(&dedup),
            channel,
            DigestFormatter::from_config(config),
            Arc::clone(&metrics),
            config.flush_interval(),
        ));

        info!(
            "Notification engine initialized (flush_interval={}s, dedup_retention_hours={})",
            config.flush_interval_seconds, config.dedup_retention_hours
        );

        Self {
            service,
            dispatcher,
            queue,
            dedup,
            metrics,
        }
    }

    /// Producer hooks for incident handlers.
    pub fn service(&self) -> Arc<NotificationService> {
        Arc::clone(&self.service)
    }

    /// The dispatcher.
    pub fn dispatcher(&self) -> Arc<NotificationDispatcher> {
        Arc::clone(&self.dispatcher)
    }

    /// Start the background dispatch loop. It stops after a final flush once
    /// `shutdown` turns `true`.
    pub fn start(&self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        self.dispatcher().spawn(shutdown)
    }

    /// Run a single dispatch cycle immediately.
    pub async fn flush(&self) -> CycleReport {
        self.dispatcher.run_cycle().await
    }

    /// Entries waiting for the next cycle.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Dedup keys currently remembered.
    pub fn remembered_keys(&self) -> usize {
        self.dedup.len()
    }

    /// Counter snapshot.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::memory::InMemoryUserDirectory;
    use crate::testing::RecordingChannel;
    use incidenthub_core::types::id::UserId;
    use incidenthub_entity::incident::{Incident, IncidentPriority};
    use incidenthub_entity::user::User;

    #[tokio::test]
    async fn test_engine_shares_queue_between_service_and_dispatcher() {
        let creator = UserId::new();
        let directory = Arc::new(InMemoryUserDirectory::new());
        directory.insert(User::new(creator, "creator@example.com"));
        let channel = Arc::new(RecordingChannel::new());

        let engine = NotificationEngine::new(
            &NotificationsConfig::default(),
            directory,
            channel.clone(),
        );

        let incident = Incident::new("Disk full", IncidentPriority::Medium, creator);
        engine.service().notify_on_create(&incident).await;
        assert_eq!(engine.pending(), 1);
        assert_eq!(engine.remembered_keys(), 1);

        let report = engine.flush().await;
        assert_eq!(report.sent, 1);
        assert_eq!(engine.pending(), 0);

        let metrics = engine.metrics();
        assert_eq!(metrics.enqueued, 1);
        assert_eq!(metrics.sent, 1);
        assert_eq!(metrics.cycles, 1);
    }
}
