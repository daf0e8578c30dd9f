pub mod webhook;

pub use webhook::{receive_webhook, PayloadHandler, WebhookReceiver};
