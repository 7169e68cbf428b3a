//! Tool trait definition
//!
//! A tool is one operation of the gateway's surface, invoked by an external
//! tool-calling host with a JSON-object argument. Execution always yields a
//! JSON envelope: success or a structured error, never a raw transport
//! failure.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Tool execution result.
///
/// `output` is the serialized response envelope; `is_error` mirrors which of
/// the two envelope shapes it carries.
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub output: JsonValue,
    pub is_error: bool,
}

impl ToolResult {
    /// Wrap a success envelope.
    pub fn success(output: JsonValue) -> Self {
        Self {
            output,
            is_error: false,
        }
    }

    /// Wrap an error envelope.
    pub fn error(output: JsonValue) -> Self {
        Self {
            output,
            is_error: true,
        }
    }
}

/// Tool definition advertised to the host.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: JsonValue,
}

impl ToolDefinition {
    pub fn new(name: &str, description: &str, input_schema: JsonValue) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Trait implemented by each gateway operation.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name used by the host to select the operation.
    fn name(&self) -> &str;

    /// Human-readable description shown to the host.
    fn description(&self) -> &str;

    /// JSON schema for the tool's input object.
    fn input_schema(&self) -> JsonValue;

    /// Execute the tool with the given input.
    ///
    /// Expected failures (validation, auth, unsupported operations) are
    /// reported inside the returned envelope, not as an `Err`.
    async fn execute(&self, input: JsonValue) -> ToolResult;
}
