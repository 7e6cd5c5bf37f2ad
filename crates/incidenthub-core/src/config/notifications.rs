//! Notification engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Seconds in one dedup retention hour.
pub const SECONDS_PER_HOUR: u64 = 3600;

/// Queue, dedup, and dispatcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Seconds between dispatch cycles.
    #[serde(default = "default_flush_interval")]
    pub flush_interval_seconds: u64,
    /// Hours a dedup key is remembered. `0` keeps keys for the whole
    /// process lifetime.
    #[serde(default = "default_dedup_retention")]
    pub dedup_retention_hours: u64,
    /// Prefix prepended to every digest subject line.
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
    /// Link rendered at the bottom of HTML digests.
    #[serde(default = "default_platform_url")]
    pub platform_url: String,
}

impl NotificationsConfig {
    /// Dispatch period as a [`Duration`].
    pub fn flush_interval(&self) -> Duration {
        Duration::from_secs(self.flush_interval_seconds)
    }

    /// Dedup retention window, or `None` when keys never expire.
    pub fn dedup_retention(&self) -> Option<Duration> {
        match self.dedup_retention_hours {
            0 => None,
            hours => Some(Duration::from_secs(hours.saturating_mul(SECONDS_PER_HOUR))),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            flush_interval_seconds: default_flush_interval(),
            dedup_retention_hours: default_dedup_retention(),
            subject_prefix: default_subject_prefix(),
            platform_url: default_platform_url(),
        }
    }
}

fn default_flush_interval() -> u64 {
    30
}

fn default_dedup_retention() -> u64 {
    24
}

fn default_subject_prefix() -> String {
    "[IncidentHub]".to_string()
}

fn default_platform_url() -> String {
    "http://localhost:5500/incidents".to_string()
}
