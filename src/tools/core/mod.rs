pub mod dyn_tool;
pub mod error;
pub mod registry;
pub mod spec;
pub mod tool;

pub use dyn_tool::DynTool;
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use spec::{ToolDescriptor, ToolSpec};
pub use tool::{Tool, ToolContext, ToolInput};
