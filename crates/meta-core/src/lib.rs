//! meta-core: Meta Gateway Core Library
//!
//! Shared foundation for the platform adapters and the gateway binary:
//! the error taxonomy, configuration, request/response models, validators,
//! the Graph API HTTP client, the platform adapter trait, the mock adapter
//! and the tool registry.

pub mod adapter;
pub mod config;
pub mod error;
pub mod graph;
pub mod mock;
pub mod models;
pub mod tool;
pub mod validators;

pub use adapter::PlatformAdapter;
pub use config::Settings;
pub use error::{map_api_error, ErrorCode, MetaError, Result};
pub use graph::GraphClient;
pub use mock::MockAdapter;
pub use models::{
    AnalyticsReport, AnalyticsRequest, ErrorEnvelope, GetMessagesRequest, Message, MetaResponse,
    Metric, Period, Platform, PostContentRequest, PostReceipt, SendMessageRequest, SendReceipt,
};
pub use tool::{Tool, ToolDefinition, ToolManager, ToolResult};
