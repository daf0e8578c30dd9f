// Outbound integration services

pub mod webhook_sender;

pub use webhook_sender::{SenderConfig, WebhookSender, DEFAULT_ENDPOINT_ROOT, DEFAULT_USER_AGENT};
