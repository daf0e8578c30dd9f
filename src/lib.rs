//! Bidirectional webhook gateway for the Sakura IoT platform.
//!
//! Inbound: [`WebhookReceiver`] verifies the `X-Sakura-Signature` header,
//! decodes the JSON envelope and dispatches it to registered callbacks.
//! Outbound: [`WebhookSender`] serializes a [`Payload`], signs it and posts
//! it to the platform's Incoming-Webhook endpoint.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{ChannelError, SendError};
pub use handlers::webhook::WebhookReceiver;
pub use models::payload::{Channel, ChannelValue, InnerPayload, Payload};
pub use router::webhook_router;
pub use services::webhook_sender::{SenderConfig, WebhookSender};
pub use utils::signature::SIGNATURE_HEADER;
