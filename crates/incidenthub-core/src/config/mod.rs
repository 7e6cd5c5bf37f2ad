//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod directory;
pub mod logging;
pub mod notifications;
pub mod smtp;

use serde::{Deserialize, Serialize};

pub use self::directory::{DirectoryConfig, SeedUser};
pub use self::logging::LoggingConfig;
pub use self::notifications::NotificationsConfig;
pub use self::smtp::SmtpConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Notification queue and dispatcher settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// Outbound SMTP settings.
    #[serde(default)]
    pub smtp: SmtpConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Seed users for the in-memory user directory.
    #[serde(default)]
    pub directory: DirectoryConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with an environment-specific overlay
    /// and environment variables prefixed with `INCIDENTHUB__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// Load configuration from an explicit directory.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("INCIDENTHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        parsed.validate()?;
        Ok(parsed)
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.notifications.flush_interval_seconds == 0 {
            return Err(AppError::configuration(
                "notifications.flush_interval_seconds must be greater than zero",
            ));
        }

        if self
            .notifications
            .dedup_retention_hours
            .checked_mul(notifications::SECONDS_PER_HOUR)
            .is_none()
        {
            return Err(AppError::configuration(format!(
                "notifications.dedup_retention_hours is too large: {}",
                self.notifications.dedup_retention_hours
            )));
        }

        if self.smtp.enabled {
            if self.smtp.timeout_seconds == 0 {
                return Err(AppError::configuration(
                    "smtp.timeout_seconds must be greater than zero when smtp is enabled",
                ));
            }
            if self.smtp.host.trim().is_empty() {
                return Err(AppError::configuration(
                    "smtp.host is required when smtp is enabled",
                ));
            }
            if self.smtp.from_address.trim().is_empty() {
                return Err(AppError::configuration(
                    "smtp.from_address is required when smtp is enabled",
                ));
            }
        }

        Ok(())
    }
}
