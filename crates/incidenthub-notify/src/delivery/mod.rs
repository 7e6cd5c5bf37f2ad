//! Outbound delivery channels.

pub mod log;
pub mod smtp;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use incidenthub_core::config::SmtpConfig;
use incidenthub_core::result::AppResult;

pub use self::log::LogDeliveryChannel;
pub use self::smtp::SmtpDeliveryChannel;

/// A rendered digest ready to be handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text_body: String,
    /// HTML body.
    pub html_body: String,
}

/// Transport that delivers one message to one address.
///
/// Implementations enforce their own send timeout. The dispatcher never
/// holds engine locks across a call to [`DeliveryChannel::send`].
#[async_trait]
pub trait DeliveryChannel: Send + Sync + std::fmt::Debug + 'static {
    /// Short name used in logs.
    fn channel_type(&self) -> &'static str;

    /// Deliver `message` to `to`.
    async fn send(&self, to: &str, message: &OutboundMessage) -> AppResult<()>;
}

/// Build the channel selected by configuration.
///
/// SMTP when enabled, otherwise a channel that only logs digests.
pub fn from_config(config: &SmtpConfig) -> AppResult<Arc<dyn DeliveryChannel>> {
    if config.enabled {
        Ok(Arc::new(SmtpDeliveryChannel::new(config)?))
    } else {
        Ok(Arc::new(LogDeliveryChannel::new()))
    }
}
