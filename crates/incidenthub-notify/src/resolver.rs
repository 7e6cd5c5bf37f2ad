//! Recipient resolution for incident notifications.

use std::sync::Arc;

use tracing::trace;

use incidenthub_core::result::AppResult;
use incidenthub_core::types::id::UserId;
use incidenthub_entity::incident::Incident;
use incidenthub_entity::user::User;

use crate::directory::UserDirectory;

/// Determines which users should hear about an incident.
#[derive(Debug, Clone)]
pub struct RecipientResolver {
    /// User directory for id → record lookups.
    directory: Arc<dyn UserDirectory>,
}

impl RecipientResolver {
    /// Creates a new resolver.
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Returns the creator and assignee of `incident`, each at most once.
    ///
    /// Identifiers that no longer resolve to a user are dropped. The result
    /// keeps creator-then-assignee order.
    pub async fn resolve_recipients(&self, incident: &Incident) -> AppResult<Vec<User>> {
        let ids = incident.stakeholder_ids();
        self.resolve_ids(&ids).await
    }

    /// Looks up a single user, `None` if it does not exist.
    pub async fn resolve_user(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.resolve_ids(&[id]).await?.into_iter().next())
    }

    async fn resolve_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found = self.directory.find_users_by_ids(ids).await?;

        let mut resolved: Vec<User> = Vec::with_capacity(ids.len());
        for id in ids {
            if resolved.iter().any(|u| u.id == *id) {
                continue;
            }
            match found.iter().find(|u| u.id == *id) {
                Some(user) => resolved.push(user.clone()),
                None => trace!("User {} no longer exists, skipping", id),
            }
        }

        Ok(resolved)
    }
}
