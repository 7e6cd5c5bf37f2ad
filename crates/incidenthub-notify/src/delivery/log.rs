//! Delivery channel that writes digests to the log instead of sending them.

use async_trait::async_trait;
use tracing::info;

use incidenthub_core::result::AppResult;

use super::{DeliveryChannel, OutboundMessage};

/// Logs each digest at `info` level. Used when SMTP is disabled.
#[derive(Debug, Default, Clone)]
pub struct LogDeliveryChannel;

impl LogDeliveryChannel {
    /// Create a new log channel.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DeliveryChannel for LogDeliveryChannel {
    fn channel_type(&self) -> &'static str {
        "log"
    }

    async fn send(&self, to: &str, message: &OutboundMessage) -> AppResult<()> {
        info!(
            to = %to,
            subject = %message.subject,
            body = %message.text_body,
            "Digest (log delivery)"
        );
        Ok(())
    }
}
