use crate::{MailMessage, MailTransport, SendReceipt, TransportError};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Delivers messages through an SMTP relay.
pub struct SmtpMailTransport {
    relay: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    pub fn new(settings: &SmtpSettings) -> Result<Self, TransportError> {
        let builder = if settings.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        }
        .map_err(|e| TransportError::Setup(e.to_string()))?
        .port(settings.port);

        let builder = match (&settings.username, &settings.password) {
            (Some(user), Some(password)) => {
                builder.credentials(Credentials::new(user.clone(), password.clone()))
            }
            _ => builder,
        };

        debug!("SMTP relay configured for {}:{}", settings.host, settings.port);
        Ok(Self {
            relay: builder.build(),
        })
    }
}

#[async_trait::async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, message: MailMessage) -> Result<SendReceipt, TransportError> {
        let (email, message_id) = build_message(&message).await?;
        let accepted = email
            .envelope()
            .to()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        let response = self
            .relay
            .send(email)
            .await
            .map_err(|e| TransportError::Delivery(e.to_string()))?;

        let response_text = format!(
            "{} {}",
            response.code(),
            response.message().collect::<Vec<&str>>().join(" ")
        );
        info!("Email {} sent to {}: {}", message_id, message.to, response_text);

        Ok(SendReceipt {
            message_id,
            accepted,
            response: response_text,
        })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, TransportError> {
    address
        .trim()
        .parse()
        .map_err(|e: lettre::address::AddressError| TransportError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Build the MIME message and the Message-ID it carries. Attachments are read
/// from disk here, so a missing file fails the send.
pub(crate) async fn build_message(
    message: &MailMessage,
) -> Result<(Message, String), TransportError> {
    let from = parse_mailbox(&message.from)?;
    let message_id = format!(
        "<{}.{:08x}@{}>",
        chrono::Utc::now().timestamp_millis(),
        rand::random::<u32>(),
        from.email.domain()
    );

    let mut builder = Message::builder()
        .from(from)
        .to(parse_mailbox(&message.to)?)
        .subject(message.subject.clone())
        .message_id(Some(message_id.clone()));

    if let Some(cc) = &message.cc {
        for address in cc.split(',').map(str::trim).filter(|a| !a.is_empty()) {
            builder = builder.cc(parse_mailbox(address)?);
        }
    }

    let attachments = message.attachments.as_deref().unwrap_or_default();
    let email = if attachments.is_empty() {
        builder.body(message.text.clone())
    } else {
        let content_type = ContentType::parse("application/octet-stream")
            .map_err(|e| TransportError::Build(e.to_string()))?;
        let mut parts = MultiPart::mixed().singlepart(SinglePart::plain(message.text.clone()));
        for attachment in attachments {
            let content = tokio::fs::read(&attachment.path).await.map_err(|source| {
                TransportError::Attachment {
                    path: attachment.path.clone(),
                    source,
                }
            })?;
            let filename = attachment
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "attachment".to_string());
            parts = parts.singlepart(Attachment::new(filename).body(content, content_type.clone()));
        }
        builder.multipart(parts)
    }
    .map_err(|e| TransportError::Build(e.to_string()))?;

    Ok((email, message_id))
}
