//! In-memory user directory backed by a `RwLock<HashMap>`.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use incidenthub_core::config::DirectoryConfig;
use incidenthub_core::result::AppResult;
use incidenthub_core::types::id::UserId;
use incidenthub_entity::user::User;

use super::UserDirectory;

/// User directory holding records in process memory.
///
/// Used by the standalone server (seeded from configuration) and by tests.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory pre-populated from configuration.
    pub fn from_config(config: &DirectoryConfig) -> Self {
        let directory = Self::new();
        for seed in &config.users {
            let user = User::new(seed.id, seed.email.clone());
            let user = match &seed.name {
                Some(name) => user.with_name(name.clone()),
                None => user,
            };
            directory.insert(user);
        }
        directory
    }

    /// Insert or replace a user.
    pub fn insert(&self, user: User) {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.insert(user.id, user);
    }

    /// Remove a user, returning the old record.
    pub fn remove(&self, id: UserId) -> Option<User> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.remove(&id)
    }

    /// Number of known users.
    pub fn len(&self) -> usize {
        self.users.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the directory holds no users.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_users_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use incidenthub_core::config::SeedUser;

    #[tokio::test]
    async fn test_find_skips_unknown_ids() {
        let directory = InMemoryUserDirectory::new();
        let known = User::new(UserId::new(), "known@example.com");
        directory.insert(known.clone());

        let found = directory
            .find_users_by_ids(&[known.id, UserId::new()])
            .await
            .unwrap();
        assert_eq!(found, vec![known]);
    }

    #[tokio::test]
    async fn test_from_config_and_remove() {
        let id = UserId::new();
        let config = DirectoryConfig {
            users: vec![SeedUser {
                id,
                email: "seed@example.com".to_string(),
                name: Some("Seed".to_string()),
            }],
        };
        let directory = InMemoryUserDirectory::from_config(&config);
        assert_eq!(directory.len(), 1);

        let removed = directory.remove(id).unwrap();
        assert_eq!(removed.name.as_deref(), Some("Seed"));
        assert!(directory.is_empty());
        assert!(directory.find_users_by_ids(&[id]).await.unwrap().is_empty());
    }
}
