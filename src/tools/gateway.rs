use super::core::{DynTool, ToolContext, ToolDescriptor, ToolError, ToolRegistry};
use crate::mcp::types::{ToolCallResult, ToolResultContent};
use mail_transport::MailTransport;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Lists the tool catalog and turns every invocation into exactly one
/// response envelope.
pub struct ToolGateway {
    registry: ToolRegistry,
    transport: Arc<dyn MailTransport>,
    sender: String,
}

impl ToolGateway {
    pub fn new(transport: Arc<dyn MailTransport>, sender: impl Into<String>) -> Self {
        Self {
            registry: ToolRegistry::with_default_tools(),
            transport,
            sender: sender.into(),
        }
    }

    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.registry.descriptors()
    }

    /// Run the named tool. Failures come back as an error envelope, never as `Err`.
    pub async fn invoke(&self, name: &str, arguments: Option<Value>) -> ToolCallResult {
        match self.dispatch(name, arguments).await {
            Ok(text) => ToolCallResult {
                content: vec![ToolResultContent::Text { text }],
                is_error: false,
            },
            Err(e) => {
                warn!("Tool {} failed: {}", name, e);
                ToolCallResult {
                    content: vec![ToolResultContent::Text {
                        text: format!("Error: {e}"),
                    }],
                    is_error: true,
                }
            }
        }
    }

    async fn dispatch(&self, name: &str, arguments: Option<Value>) -> Result<String, ToolError> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let arguments = arguments.unwrap_or(Value::Null);
        debug!("Invoking {} with {}", name, arguments);

        let context = ToolContext {
            transport: self.transport.as_ref(),
            sender: &self.sender,
        };
        tool.invoke(&context, arguments).await
    }
}
