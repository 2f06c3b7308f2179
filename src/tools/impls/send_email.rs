use super::message_fields::{given, read_field, MessageFields, RawMessageFields};
use crate::tools::core::{Tool, ToolContext, ToolError, ToolInput, ToolSpec};
use chrono::{SecondsFormat, Utc};
use mail_transport::{AttachmentSpec, MailMessage};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(expecting = "an object of send_email arguments")]
pub struct RawSendEmailInput {
    #[serde(flatten)]
    message: RawMessageFields,
    #[serde(default)]
    cc: Option<Value>,
    #[serde(default)]
    attachments: Option<Value>,
}

#[derive(Debug)]
pub struct SendEmailInput {
    pub message: MessageFields,
    pub cc: Option<String>,
    pub attachments: Vec<PathBuf>,
}

impl ToolInput for SendEmailInput {
    type Raw = RawSendEmailInput;

    fn validate(raw: Self::Raw) -> Result<Self, ToolError> {
        let message = MessageFields::try_from(raw.message)?;
        let cc = given(raw.cc)
            .map(|cc| read_field::<String>("cc", cc))
            .transpose()?;
        let attachments = given(raw.attachments)
            .map(|paths| read_field::<Vec<String>>("attachments", paths))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            message,
            cc,
            attachments: attachments.into_iter().map(PathBuf::from).collect(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailOutput {
    pub success: bool,
    pub message_id: String,
    pub to: String,
    pub subject: String,
    pub timestamp: String,
}

pub struct SendEmailTool;

#[async_trait::async_trait]
impl Tool for SendEmailTool {
    type Input = SendEmailInput;
    type Output = SendEmailOutput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "send_email",
            description:
                "Send an email to a recipient. Requires prior approval for sensitive actions.",
            parameters_schema: json!({
                "type": "object",
                "properties": {
                    "to": {
                        "type": "string",
                        "description": "Recipient email address"
                    },
                    "subject": {
                        "type": "string",
                        "description": "Email subject line"
                    },
                    "body": {
                        "type": "string",
                        "description": "Email body content (plain text)"
                    },
                    "cc": {
                        "type": "string",
                        "description": "CC recipients (comma-separated)"
                    },
                    "attachments": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Array of file paths to attach"
                    }
                },
                "required": ["to", "subject", "body"]
            }),
        }
    }

    async fn execute<'a>(
        &self,
        context: &ToolContext<'a>,
        input: Self::Input,
    ) -> Result<Self::Output, ToolError> {
        let SendEmailInput {
            message,
            cc,
            attachments,
        } = input;

        let attachments = (!attachments.is_empty()).then(|| {
            attachments
                .into_iter()
                .map(|path| AttachmentSpec { path })
                .collect()
        });

        let mail = MailMessage {
            from: context.sender.to_string(),
            to: message.to.clone(),
            subject: message.subject.clone(),
            text: message.body,
            cc,
            attachments,
        };

        let receipt = context.transport.send(mail).await?;
        debug!(
            "Transport accepted {:?} for {}: {}",
            receipt.accepted, receipt.message_id, receipt.response
        );

        Ok(SendEmailOutput {
            success: true,
            message_id: receipt.message_id,
            to: message.to,
            subject: message.subject,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::mocks::SpyTransport;
    use crate::tools::core::DynTool;

    const SENDER: &str = "ai-employee@example.com";

    async fn invoke(
        transport: &SpyTransport,
        arguments: serde_json::Value,
    ) -> Result<String, ToolError> {
        let context = ToolContext {
            transport,
            sender: SENDER,
        };
        DynTool::invoke(&SendEmailTool, &context, arguments).await
    }

    #[tokio::test]
    async fn test_send_builds_message_from_arguments() {
        let transport = SpyTransport::new();
        let output = invoke(
            &transport,
            json!({
                "to": "a@b.com",
                "subject": "Hi",
                "body": "Hello",
                "cc": "c@d.com",
                "attachments": ["/tmp/report.pdf", "/tmp/notes.txt"]
            }),
        )
        .await
        .unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        let mail = &sent[0];
        assert_eq!(mail.from, SENDER);
        assert_eq!(mail.to, "a@b.com");
        assert_eq!(mail.subject, "Hi");
        assert_eq!(mail.text, "Hello");
        assert_eq!(mail.cc.as_deref(), Some("c@d.com"));
        assert_eq!(
            mail.attachments,
            Some(vec![
                AttachmentSpec {
                    path: PathBuf::from("/tmp/report.pdf")
                },
                AttachmentSpec {
                    path: PathBuf::from("/tmp/notes.txt")
                },
            ])
        );

        let payload: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(payload["success"], true);
        assert_eq!(payload["messageId"], "spy-1@example.com");
        assert_eq!(payload["to"], "a@b.com");
        assert_eq!(payload["subject"], "Hi");
    }

    #[tokio::test]
    async fn test_optional_fields_omitted_when_absent_or_empty() {
        let transport = SpyTransport::new();
        invoke(
            &transport,
            json!({"to": "a@b.com", "subject": "Hi", "body": "Hello", "cc": "", "attachments": []}),
        )
        .await
        .unwrap();

        let sent = transport.sent();
        assert!(sent[0].cc.is_none());
        assert!(sent[0].attachments.is_none());
    }

    #[tokio::test]
    async fn test_timestamp_is_iso8601() {
        let transport = SpyTransport::new();
        let output = invoke(
            &transport,
            json!({"to": "a@b.com", "subject": "Hi", "body": "Hello"}),
        )
        .await
        .unwrap();

        let payload: serde_json::Value = serde_json::from_str(&output).unwrap();
        let timestamp = payload["timestamp"].as_str().unwrap();
        assert!(timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_missing_body_does_not_send() {
        let transport = SpyTransport::new();
        let err = invoke(&transport, json!({"to": "a@b.com", "subject": "Hi"}))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::MissingRequiredFields(_)));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_argument_type() {
        let transport = SpyTransport::new();
        let err = invoke(
            &transport,
            json!({"to": "a@b.com", "subject": "Hi", "body": "Hello", "attachments": "file.pdf"}),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ToolError::InvalidField { field: "attachments", .. }));
        assert_eq!(
            err.to_string(),
            "Invalid value for attachments: invalid type: string \"file.pdf\", expected a sequence"
        );
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_false_body_is_missing() {
        let transport = SpyTransport::new();
        let err = invoke(
            &transport,
            json!({"to": "a@b.com", "subject": "Hi", "body": false}),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Missing required fields: to, subject, body");
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_field_reported_before_wrong_type() {
        let transport = SpyTransport::new();
        let err = invoke(&transport, json!({"to": 5, "subject": "Hi"}))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Missing required fields: to, subject, body");
    }

    #[tokio::test]
    async fn test_non_object_arguments_are_empty() {
        let transport = SpyTransport::new();
        let err = invoke(&transport, json!("not an object")).await.unwrap_err();

        assert_eq!(err.to_string(), "Missing required fields: to, subject, body");
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_falsy_optional_fields_are_omitted() {
        let transport = SpyTransport::new();
        invoke(
            &transport,
            json!({"to": "a@b.com", "subject": "Hi", "body": "Hello", "cc": null, "attachments": false}),
        )
        .await
        .unwrap();

        let sent = transport.sent();
        assert!(sent[0].cc.is_none());
        assert!(sent[0].attachments.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_is_returned() {
        let transport = SpyTransport::failing("550 mailbox unavailable");
        let err = invoke(
            &transport,
            json!({"to": "a@b.com", "subject": "Hi", "body": "Hello"}),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ToolError::Transport(_)));
        assert!(err.to_string().contains("550 mailbox unavailable"));
    }
}
