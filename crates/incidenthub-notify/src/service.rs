//! Producer hooks called by incident mutation handlers.

use std::sync::Arc;

use tracing::{debug, error, trace};

use incidenthub_core::types::id::UserId;
use incidenthub_entity::incident::Incident;
use incidenthub_entity::notification::{ActionKind, NotificationEntry};
use incidenthub_entity::user::User;

use crate::dedup::DedupFilter;
use crate::metrics::NotificationMetrics;
use crate::queue::NotificationQueue;
use crate::resolver::RecipientResolver;

/// Turns incident lifecycle events into queued notifications.
///
/// Every hook is infallible from the caller's point of view: lookup errors
/// are logged and counted, never returned, so an incident mutation never
/// fails because of notification bookkeeping.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Creator/assignee lookup.
    resolver: RecipientResolver,
    /// Dedup filter shared with the dispatcher.
    dedup: Arc<DedupFilter>,
    /// Queue shared with the dispatcher.
    queue: Arc<NotificationQueue>,
    /// Engine counters.
    metrics: Arc<NotificationMetrics>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        resolver: RecipientResolver,
        dedup: Arc<DedupFilter>,
        queue: Arc<NotificationQueue>,
        metrics: Arc<NotificationMetrics>,
    ) -> Self {
        Self {
            resolver,
            dedup,
            queue,
            metrics,
        }
    }

    /// A new incident was persisted. Notifies creator and assignee.
    pub async fn notify_on_create(&self, incident: &Incident) {
        self.notify_stakeholders(incident, ActionKind::Created).await;
    }

    /// The assignee field was written. Notifies the new assignee only, and
    /// only when it actually changed.
    pub async fn notify_on_assign(&self, incident: &Incident, previous_assignee: Option<UserId>) {
        let Some(assignee) = incident.assigned_to else {
            return;
        };
        if previous_assignee == Some(assignee) {
            trace!("Incident {} reassigned to the same user, skipping", incident.id);
            return;
        }

        match self.resolver.resolve_user(assignee).await {
            Ok(Some(user)) => self.push(&user, incident, ActionKind::Assigned),
            Ok(None) => trace!("Assignee {} not found, skipping", assignee),
            Err(e) => {
                self.metrics.record_lookup_error();
                error!(
                    "Failed to resolve assignee {} for incident {}: {}",
                    assignee, incident.id, e
                );
            }
        }
    }

    /// Status or priority changed. Notifies creator and assignee once per
    /// incident while the dedup key is retained.
    pub async fn notify_on_update(&self, incident: &Incident) {
        self.notify_stakeholders(incident, ActionKind::Updated).await;
    }

    async fn notify_stakeholders(&self, incident: &Incident, action: ActionKind) {
        let users = match self.resolver.resolve_recipients(incident).await {
            Ok(users) => users,
            Err(e) => {
                self.metrics.record_lookup_error();
                error!(
                    "Failed to resolve recipients for incident {} ({}): {}",
                    incident.id, action, e
                );
                return;
            }
        };

        for user in &users {
            if self.dedup.should_notify(user.id, incident.id, action) {
                self.push(user, incident, action);
            } else {
                self.metrics.record_deduplicated();
                debug!(
                    "Notification deduplicated: user={}, incident={}, action={}",
                    user.id, incident.id, action
                );
            }
        }
    }

    fn push(&self, user: &User, incident: &Incident, action: ActionKind) {
        debug!(
            "Queueing notification: user={}, incident={}, action={}",
            user.email, incident.id, action
        );
        self.queue.enqueue(NotificationEntry::new(user, incident, action));
        self.metrics.record_enqueued();
    }
}
