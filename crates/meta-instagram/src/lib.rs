//! meta-instagram: Instagram adapter

pub mod adapter;

pub use adapter::InstagramAdapter;
