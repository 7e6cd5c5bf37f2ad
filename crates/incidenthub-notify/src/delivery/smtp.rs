//! Email delivery over SMTP using `lettre`.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use incidenthub_core::config::SmtpConfig;
use incidenthub_core::error::{AppError, ErrorKind};
use incidenthub_core::result::AppResult;

use super::{DeliveryChannel, OutboundMessage};

/// Sends digests through an SMTP relay with STARTTLS.
///
/// The transport is built once and reused for every message; each send is
/// bounded by `smtp.timeout_seconds`.
#[derive(Clone)]
pub struct SmtpDeliveryChannel {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for SmtpDeliveryChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpDeliveryChannel")
            .field("from", &self.from.to_string())
            .finish()
    }
}

impl SmtpDeliveryChannel {
    /// Build the transport from configuration.
    pub fn new(config: &SmtpConfig) -> AppResult<Self> {
        let from: Mailbox = config.from_address.parse().map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid smtp.from_address '{}'", config.from_address),
                e,
            )
        })?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to create SMTP transport for '{}'", config.host),
                    e,
                )
            })?
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_seconds)));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, to: &str, message: &OutboundMessage) -> AppResult<Message> {
        let to: Mailbox = to.parse().map_err(|e| {
            AppError::with_source(
                ErrorKind::Delivery,
                format!("Invalid recipient address '{to}'"),
                e,
            )
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                message.text_body.clone(),
                message.html_body.clone(),
            ))
            .map_err(|e| AppError::with_source(ErrorKind::Delivery, "Failed to build email", e))
    }
}

#[async_trait]
impl DeliveryChannel for SmtpDeliveryChannel {
    fn channel_type(&self) -> &'static str {
        "smtp"
    }

    async fn send(&self, to: &str, message: &OutboundMessage) -> AppResult<()> {
        let email = self.build_message(to, message)?;

        self.transport.send(email).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Delivery,
                format!("SMTP send to '{to}' failed"),
                e,
            )
        })?;

        debug!(to = %to, subject = %message.subject, "Email accepted by relay");
        Ok(())
    }
}
