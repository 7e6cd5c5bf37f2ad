//! Shared test helpers for integration tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use incidenthub_core::config::NotificationsConfig;
use incidenthub_core::error::AppError;
use incidenthub_core::result::AppResult;
use incidenthub_core::types::id::UserId;
use incidenthub_entity::user::User;
use incidenthub_notify::{DeliveryChannel, NotificationEngine, OutboundMessage, UserDirectory};

/// User store fake that can be switched into a failing state.
#[derive(Debug, Default)]
pub struct FakeDirectory {
    users: Mutex<HashMap<UserId, User>>,
    unavailable: AtomicBool,
}

impl FakeDirectory {
    /// Add a user and return its id
    pub fn add(&self, email: &str) -> UserId {
        let user = User::new(UserId::new(), email);
        let id = user.id;
        self.users.lock().unwrap().insert(id, user);
        id
    }

    /// Make every subsequent lookup fail
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserDirectory for FakeDirectory {
    async fn find_users_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::external_service("user store offline"));
        }
        let users = self.users.lock().unwrap();
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}

/// Delivery channel fake that records every message
#[derive(Debug, Default)]
pub struct CapturingChannel {
    rejected: Mutex<HashSet<String>>,
    delivered: Mutex<Vec<(String, OutboundMessage)>>,
    calls: Mutex<usize>,
}

impl CapturingChannel {
    /// Reject every message addressed to `address`
    pub fn reject(&self, address: &str) {
        self.rejected.lock().unwrap().insert(address.to_string());
    }

    /// Messages the channel accepted, in send order
    pub fn delivered(&self) -> Vec<(String, OutboundMessage)> {
        self.delivered.lock().unwrap().clone()
    }

    /// Total send attempts
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl DeliveryChannel for CapturingChannel {
    fn channel_type(&self) -> &'static str {
        "capturing"
    }

    async fn send(&self, to: &str, message: &OutboundMessage) -> AppResult<()> {
        *self.calls.lock().unwrap() += 1;
        if self.rejected.lock().unwrap().contains(to) {
            return Err(AppError::delivery(format!("relay rejected {to}")));
        }
        self.delivered
            .lock()
            .unwrap()
            .push((to.to_string(), message.clone()));
        Ok(())
    }
}

/// Test application context
pub struct TestEngine {
    /// Engine under test
    pub engine: NotificationEngine,
    /// Fake user store
    pub directory: Arc<FakeDirectory>,
    /// Fake mail relay
    pub channel: Arc<CapturingChannel>,
}

impl TestEngine {
    /// Create an engine with default notification settings
    pub fn new() -> Self {
        Self::with_config(NotificationsConfig::default())
    }

    /// Create an engine with the given notification settings
    pub fn with_config(config: NotificationsConfig) -> Self {
        let directory = Arc::new(FakeDirectory::default());
        let channel = Arc::new(CapturingChannel::default());
        let engine = NotificationEngine::new(&config, directory.clone(), channel.clone());
        Self {
            engine,
            directory,
            channel,
        }
    }
}
