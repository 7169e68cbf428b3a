//! meta-facebook: Facebook Messenger and Pages adapter

pub mod adapter;

pub use adapter::FacebookAdapter;
