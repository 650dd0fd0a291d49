use std::path::PathBuf;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::info;

use frontdesk_agent::OrderNotifier;
use frontdesk_core::config::MailConfig;
use frontdesk_core::SlotValues;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("could not assemble mail message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("invalid attachment content type: {0}")]
    ContentType(#[from] lettre::message::header::ContentTypeErr),
    #[error("could not read mail attachment `{path}`: {source}")]
    Attachment { path: PathBuf, source: std::io::Error },
    #[error("smtp send failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

impl MailError {
    pub fn user_message(&self) -> &'static str {
        "Sorry, I couldn't send the order confirmation email. Please try again later."
    }
}

/// Sends the order-confirmation email. STARTTLS with plain login, one send
/// attempt per confirmation, no retry.
pub struct OrderMailer {
    config: MailConfig,
}

impl OrderMailer {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    pub async fn send_confirmation(&self, slots: &SlotValues) -> Result<(), MailError> {
        let from: Mailbox = self.config.from_address.parse()?;
        let to: Mailbox = self.config.to_address.parse()?;

        let mut parts = MultiPart::mixed().singlepart(SinglePart::html(render_body(slots)));

        // The attachment is optional equipment: silently skipped when the
        // configured file is absent from disk.
        if let Some(path) = &self.config.attachment_path {
            if path.exists() {
                let bytes = tokio::fs::read(path).await.map_err(|source| {
                    MailError::Attachment { path: path.clone(), source }
                })?;
                let filename = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or("attachment")
                    .to_string();
                parts = parts.singlepart(
                    Attachment::new(filename)
                        .body(bytes, ContentType::parse("application/octet-stream")?),
                );
            }
        }

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(format!("Order Confirmation - {}", slots.item_name))
            .multipart(parts)?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.expose_secret().to_string(),
            ))
            .build();

        mailer.send(message).await?;

        info!(
            event_name = "mail.order_confirmation.sent",
            item_name = %slots.item_name,
            quantity = slots.quantity,
            "order confirmation email sent"
        );
        Ok(())
    }
}

#[async_trait]
impl OrderNotifier for OrderMailer {
    async fn notify_order(&self, slots: &SlotValues) -> anyhow::Result<()> {
        self.send_confirmation(slots).await?;
        Ok(())
    }
}

/// Fixed HTML body with the current slot values interpolated. Kept as a
/// free function so the interpolation is testable without a transport.
pub fn render_body(slots: &SlotValues) -> String {
    format!(
        "<html>\
         <body>\
         <h2>New Tile Order Confirmation</h2>\
         <p>A customer confirmed the following order:</p>\
         <table border=\"1\" cellpadding=\"6\">\
         <tr><th>Tile Name</th><th>Size</th><th>Quantity</th></tr>\
         <tr><td>{item}</td><td>{size}</td><td>{quantity}</td></tr>\
         </table>\
         <p>This order was placed through the Niro Ceramic Group assistant.</p>\
         </body>\
         </html>",
        item = slots.item_name,
        size = slots.size,
        quantity = slots.quantity,
    )
}
