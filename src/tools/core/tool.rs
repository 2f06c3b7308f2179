use super::error::ToolError;
use super::spec::ToolSpec;
use mail_transport::MailTransport;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Context provided to tools during execution
pub struct ToolContext<'a> {
    /// Transport used for outbound mail
    pub transport: &'a dyn MailTransport,
    /// Sender address applied to every outgoing message
    pub sender: &'a str,
}

/// Typed tool arguments, built from the loose JSON a client sends.
pub trait ToolInput: Sized + Send {
    /// Shape the arguments arrive in, before required fields are checked
    type Raw: DeserializeOwned + Send;

    fn validate(raw: Self::Raw) -> Result<Self, ToolError>;
}

/// Core trait for tools, defining the execution interface
#[async_trait::async_trait]
pub trait Tool: Send + Sync + 'static {
    type Input: ToolInput;

    /// Serialized as the text of a successful response
    type Output: Serialize + Send + Sync;

    fn spec(&self) -> ToolSpec;

    /// Execute the tool with already validated input
    async fn execute<'a>(
        &self,
        context: &ToolContext<'a>,
        input: Self::Input,
    ) -> Result<Self::Output, ToolError>;
}
