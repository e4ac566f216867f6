//! Outbound notification composition.
//!
//! The core composes messages; delivery belongs to an external transport
//! behind [`NotificationTransport`]. One attempt per message, no queueing,
//! no retries.

use async_trait::async_trait;
use tracing::info;

use crate::error::Error;

/// A plain-text message for a single recipient from one fixed sender.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl Message {
    pub fn compose(sender: &str, recipient: &str, subject: &str, body: &str) -> Self {
        Self {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        }
    }
}

/// Delivery boundary.
///
/// Implementations make a single send attempt and report failure as
/// [`Error::NotificationFailed`]; nothing on this side retries.
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    async fn send(&self, message: &Message) -> Result<(), Error>;
}

/// Stand-in transport used when no delivery backend is configured: logs the
/// composed message instead of sending it.
pub struct LoggingTransport;

#[async_trait]
impl NotificationTransport for LoggingTransport {
    async fn send(&self, message: &Message) -> Result<(), Error> {
        info!(
            recipient = %message.recipient,
            subject = %message.subject,
            "notification composed (no delivery backend configured)"
        );
        Ok(())
    }
}
