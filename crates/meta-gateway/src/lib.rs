//! meta-gateway: protocol-translation gateway over the Meta platform APIs
//!
//! Exposes a uniform four-tool surface (send message, get messages, post
//! content, get analytics) dispatched across the Facebook, Instagram and
//! WhatsApp adapters.

pub mod client;
pub mod tools;

pub use client::MetaClient;
pub use tools::register_tools;
