//! Tool manager for registering and executing tools

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value as JsonValue};

use crate::error::MetaError;
use crate::models::ErrorEnvelope;
use crate::tool::{Tool, ToolDefinition, ToolResult};

/// Manager for registered tools.
pub struct ToolManager {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolManager {
    /// Create a new empty tool manager.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. A tool with the same name is replaced.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Definitions of all registered tools, sorted by name so the
    /// advertised order is stable.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|t| ToolDefinition::new(t.name(), t.description(), t.input_schema()))
            .collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Execute a tool by name.
    ///
    /// An unknown tool name yields an error envelope, same as any other
    /// expected failure.
    pub async fn execute(&self, name: &str, input: JsonValue) -> ToolResult {
        match self.get(name) {
            Some(tool) => tool.execute(input).await,
            None => {
                let err = MetaError::validation(format!("Unknown tool: {name}"));
                ToolResult::error(json!(ErrorEnvelope::new(&err, None)))
            }
        }
    }

    /// Check if a tool is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Names of all registered tools.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input back"
        }

        fn input_schema(&self) -> JsonValue {
            json!({"type": "object"})
        }

        async fn execute(&self, input: JsonValue) -> ToolResult {
            ToolResult::success(input)
        }
    }

    #[tokio::test]
    async fn test_register_and_execute() {
        let mut manager = ToolManager::new();
        manager.register(Arc::new(EchoTool));

        assert!(manager.contains("echo"));
        assert_eq!(manager.len(), 1);

        let result = manager.execute("echo", json!({"a": 1})).await;
        assert!(!result.is_error);
        assert_eq!(result.output, json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_envelope() {
        let manager = ToolManager::new();
        let result = manager.execute("nope", json!({})).await;
        assert!(result.is_error);
        assert_eq!(result.output["error_code"], "VALIDATION_ERROR");
        assert_eq!(result.output["platform"], "unknown");
        // Full envelope shape, never a partial one.
        assert!(result.output["error_message"]
            .as_str()
            .unwrap()
            .contains("nope"));
        assert!(result.output.get("timestamp").is_some());
    }

    struct NoopTool(&'static str);

    #[async_trait]
    impl Tool for NoopTool {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "No-op"
        }

        fn input_schema(&self) -> JsonValue {
            json!({"type": "object"})
        }

        async fn execute(&self, _input: JsonValue) -> ToolResult {
            ToolResult::success(json!({}))
        }
    }

    #[test]
    fn test_definitions_sorted_by_name() {
        let mut manager = ToolManager::new();
        manager.register(Arc::new(NoopTool("zeta")));
        manager.register(Arc::new(NoopTool("alpha")));
        manager.register(Arc::new(NoopTool("mid")));

        let definitions = manager.definitions();
        let names: Vec<&str> = definitions.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }
}
