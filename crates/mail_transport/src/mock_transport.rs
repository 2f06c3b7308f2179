use crate::{MailMessage, MailTransport, SendReceipt, TransportError};
use tracing::info;

const PREVIEW_CHARS: usize = 100;

/// Logs messages instead of sending them.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockTransport;

#[async_trait::async_trait]
impl MailTransport for MockTransport {
    async fn send(&self, message: MailMessage) -> Result<SendReceipt, TransportError> {
        let preview: String = message.text.chars().take(PREVIEW_CHARS).collect();
        info!(
            to = %message.to,
            subject = %message.subject,
            cc = message.cc.as_deref().unwrap_or(""),
            attachments = message.attachments.as_ref().map_or(0, Vec::len),
            "[MOCK EMAIL] Would send email, body: {preview}..."
        );

        Ok(SendReceipt {
            message_id: format!("mock-{}@example.com", chrono::Utc::now().timestamp_millis()),
            accepted: vec![message.to],
            response: "250 Message accepted (MOCK)".to_string(),
        })
    }
}
