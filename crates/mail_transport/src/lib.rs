use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

mod mock_transport;
mod smtp_transport;
pub use mock_transport::MockTransport;
pub use smtp_transport::{SmtpMailTransport, SmtpSettings};

/// An outgoing message as handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    /// Plain text body
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentSpec>>,
}

/// A file to attach, referenced by path. Transports read it at send time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentSpec {
    pub path: PathBuf,
}

/// What a transport reports back after accepting a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReceipt {
    pub message_id: String,
    pub accepted: Vec<String>,
    pub response: String,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Failed to read attachment '{}': {source}", path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to set up SMTP relay: {0}")]
    Setup(String),

    #[error("SMTP delivery failed: {0}")]
    Delivery(String),
}

#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    /// Hand the message over for delivery. Delivery guarantees (retries,
    /// queueing) are up to the implementation.
    async fn send(&self, message: MailMessage) -> Result<SendReceipt, TransportError>;
}
