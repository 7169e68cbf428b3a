//! Tool system for the external tool-calling host
//!
//! The gateway's surface is four tools, each taking a JSON-object argument
//! and returning a JSON-object result.

pub mod manager;
pub mod traits;

pub use manager::ToolManager;
pub use traits::{Tool, ToolDefinition, ToolResult};
