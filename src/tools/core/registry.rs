use indexmap::IndexMap;

use super::dyn_tool::DynTool;
use super::spec::ToolDescriptor;

/// Registry of callable tools, kept in registration order
pub struct ToolRegistry {
    tools: IndexMap<&'static str, Box<dyn DynTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    /// Registry holding the email tools
    pub fn with_default_tools() -> Self {
        use crate::tools::impls::{DraftEmailTool, SendEmailTool};

        let mut registry = Self::new();
        registry.register(Box::new(SendEmailTool));
        registry.register(Box::new(DraftEmailTool));
        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Box<dyn DynTool>) {
        self.tools.insert(tool.spec().name, tool);
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .values()
            .map(|tool| ToolDescriptor::from(tool.spec()))
            .collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_default_tools()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tools_in_declaration_order() {
        let registry = ToolRegistry::with_default_tools();
        let names: Vec<String> = registry.descriptors().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["send_email", "draft_email"]);
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = ToolRegistry::with_default_tools();
        registry.register(Box::new(crate::tools::impls::DraftEmailTool));
        assert_eq!(registry.descriptors().len(), 2);
    }

    #[test]
    fn test_get_unknown_tool() {
        let registry = ToolRegistry::with_default_tools();
        assert!(registry.get("send_sms").is_none());
        assert!(registry.get("draft_email").is_some());
    }
}
