//! meta-whatsapp: WhatsApp Business Cloud adapter

pub mod adapter;

pub use adapter::WhatsAppAdapter;
