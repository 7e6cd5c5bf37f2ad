//! Outbound SMTP configuration.

use serde::{Deserialize, Serialize};

/// SMTP relay settings for the email delivery channel.
///
/// When `enabled` is false the server logs digests instead of sending them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// Whether to send real email.
    #[serde(default)]
    pub enabled: bool,
    /// SMTP relay host.
    #[serde(default)]
    pub host: String,
    /// SMTP relay port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// SMTP username.
    #[serde(default)]
    pub username: Option<String>,
    /// SMTP password.
    #[serde(default)]
    pub password: Option<String>,
    /// Sender address.
    #[serde(default)]
    pub from_address: String,
    /// Per-message send timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: String::new(),
            port: default_port(),
            username: None,
            password: None,
            from_address: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_port() -> u16 {
    587
}

fn default_timeout() -> u64 {
    10
}
