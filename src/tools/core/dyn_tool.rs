use super::error::ToolError;
use super::spec::ToolSpec;
use super::tool::{Tool, ToolContext, ToolInput};
use serde_json::{Map, Value};

/// Type-erased tool interface for storing heterogeneous tools in collections
#[async_trait::async_trait]
pub trait DynTool: Send + Sync + 'static {
    fn spec(&self) -> ToolSpec;

    /// Parse and validate the JSON arguments, run the tool and render its
    /// output as pretty printed JSON
    async fn invoke<'a>(&self, context: &ToolContext<'a>, arguments: Value)
        -> Result<String, ToolError>;
}

#[async_trait::async_trait]
impl<T: Tool> DynTool for T {
    fn spec(&self) -> ToolSpec {
        Tool::spec(self)
    }

    async fn invoke<'a>(
        &self,
        context: &ToolContext<'a>,
        arguments: Value,
    ) -> Result<String, ToolError> {
        // Anything other than an object carries no named fields
        let arguments = match arguments {
            Value::Object(map) => Value::Object(map),
            _ => Value::Object(Map::new()),
        };
        let raw: <T::Input as ToolInput>::Raw =
            serde_json::from_value(arguments).map_err(|source| ToolError::InvalidArguments {
                tool: Tool::spec(self).name,
                source,
            })?;
        let input = T::Input::validate(raw)?;

        let output = self.execute(context, input).await?;
        Ok(serde_json::to_string_pretty(&output)?)
    }
}
