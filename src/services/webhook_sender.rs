use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::error::SendError;
use crate::models::Payload;
use crate::utils::signature;

/// Base URL of the platform's Incoming-Webhook endpoint.
pub const DEFAULT_ENDPOINT_ROOT: &str = "https://api.sakura.io/incoming/v1";

/// User-Agent sent with every outbound request.
pub const DEFAULT_USER_AGENT: &str = concat!("sakura-iot-rs/", env!("CARGO_PKG_VERSION"));

/// Endpoint configuration for the sender. Injected explicitly rather than
/// read from process-wide globals; the defaults are the platform values.
#[derive(Debug, Clone)]
pub struct SenderConfig {
    pub endpoint_root: String,
    pub user_agent: String,
}

impl Default for SenderConfig {
    fn default() -> Self {
        SenderConfig {
            endpoint_root: DEFAULT_ENDPOINT_ROOT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Outbound webhook sender: posts payloads to the platform's
/// Incoming-Webhook endpoint, signing them when a secret is configured.
pub struct WebhookSender {
    client: Client,
    token: String,
    secret: Option<String>,
    config: SenderConfig,
}

impl WebhookSender {
    /// New sender for the given incoming-webhook token, using the platform
    /// defaults. A `None` or empty secret disables signing.
    pub fn new(token: impl Into<String>, secret: Option<String>) -> Self {
        Self::with_config(token, secret, SenderConfig::default())
    }

    pub fn with_config(
        token: impl Into<String>,
        secret: Option<String>,
        config: SenderConfig,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        WebhookSender {
            client,
            token: token.into(),
            secret: secret.filter(|s| !s.is_empty()),
            config,
        }
    }

    /// Post one payload to the platform. One call is one attempt: no retry,
    /// no backoff. The call returns only after the HTTP exchange completes
    /// or fails.
    pub async fn send(&self, payload: &Payload) -> Result<(), SendError> {
        let body = serde_json::to_vec(payload)?;
        let url = format!(
            "{}/{}",
            self.config.endpoint_root.trim_end_matches('/'),
            self.token
        );

        let mut request = self
            .client
            .post(&url)
            .header(USER_AGENT, &self.config.user_agent)
            .header(CONTENT_TYPE, "application/json");

        // The signature covers the exact byte sequence sent on the wire.
        if let Some(secret) = &self.secret {
            request = request.header(
                signature::SIGNATURE_HEADER,
                signature::sign(secret.as_bytes(), &body),
            );
        }

        debug!(url = %url, bytes = body.len(), "sending webhook payload");
        let response = request.body(body).send().await?;

        let status = response.status();
        if status == StatusCode::OK {
            info!(module = %payload.module, "webhook payload sent");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(SendError::Remote { status, body })
    }
}
