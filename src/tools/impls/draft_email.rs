use super::message_fields::MessageFields;
use crate::tools::core::{Tool, ToolContext, ToolError, ToolSpec};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

const APPROVAL_NOTE: &str = "Email draft created. Move to approval workflow before sending.";

#[derive(Debug, Serialize, Deserialize)]
pub struct Draft {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub created: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DraftEmailOutput {
    pub success: bool,
    pub action: String,
    pub draft: Draft,
    pub message: String,
}

/// Produces a draft for a separate approval step. Never sends anything.
pub struct DraftEmailTool;

#[async_trait::async_trait]
impl Tool for DraftEmailTool {
    type Input = MessageFields;
    type Output = DraftEmailOutput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "draft_email",
            description: "Draft an email without sending (for approval workflow)",
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
                        "description": "Email body content"
                    }
                },
                "required": ["to", "subject", "body"]
            }),
        }
    }

    async fn execute<'a>(
        &self,
        _context: &ToolContext<'a>,
        input: Self::Input,
    ) -> Result<Self::Output, ToolError> {
        Ok(DraftEmailOutput {
            success: true,
            action: "draft_created".to_string(),
            draft: Draft {
                to: input.to,
                subject: input.subject,
                body: input.body,
                created: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            },
            message: APPROVAL_NOTE.to_string(),
        })
    }
}
