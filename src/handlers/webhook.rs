use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode};
use tracing::{debug, info, warn};

use crate::models::Payload;
use crate::utils::signature;

/// Application callback invoked with a decoded inbound payload.
pub type PayloadHandler = Arc<dyn Fn(Payload) + Send + Sync>;

/// State of the inbound webhook endpoint: the shared secret (when signature
/// checking is enabled) and the callbacks registered per payload kind.
///
/// Callbacks are dispatched fire-and-forget on the runtime: the HTTP response
/// is written without waiting for them, so slow application logic never
/// blocks the platform's delivery loop. Callbacks from concurrent requests
/// may interleave; each receives its own decoded payload and nothing else is
/// shared.
#[derive(Clone, Default)]
pub struct WebhookReceiver {
    secret: Option<String>,
    on_channels: Option<PayloadHandler>,
    on_connection: Option<PayloadHandler>,
}

impl WebhookReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable signature verification with the given shared secret. An empty
    /// secret leaves verification disabled, matching the platform's opt-in
    /// signing model.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        self.secret = if secret.is_empty() { None } else { Some(secret) };
        self
    }

    /// Register the callback for `type = channels` payloads.
    pub fn on_channels(mut self, f: impl Fn(Payload) + Send + Sync + 'static) -> Self {
        self.on_channels = Some(Arc::new(f));
        self
    }

    /// Register the callback for `type = connection` payloads.
    pub fn on_connection(mut self, f: impl Fn(Payload) + Send + Sync + 'static) -> Self {
        self.on_connection = Some(Arc::new(f));
        self
    }
}

/// Inbound webhook endpoint.
///
/// Registered under `routing::any` so the method gate is ours: the platform
/// expects 400 for non-POST requests rather than axum's default 405.
pub async fn receive_webhook(
    State(receiver): State<WebhookReceiver>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    if method != Method::POST {
        debug!(%method, "rejecting non-POST webhook request");
        return StatusCode::BAD_REQUEST;
    }

    if let Some(secret) = &receiver.secret {
        let claimed = headers
            .get(signature::SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if !signature::verify(secret.as_bytes(), claimed, &body) {
            warn!(signature = claimed, "webhook signature verification failed");
            return StatusCode::FORBIDDEN;
        }
    }

    let payload: Payload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            debug!(error = %err, "failed to decode webhook payload");
            return StatusCode::BAD_REQUEST;
        }
    };

    if payload.is_channel_value() {
        dispatch(&receiver.on_channels, payload, "channels");
    } else if payload.is_connection() {
        dispatch(&receiver.on_connection, payload, "connection");
    } else if payload.is_keep_alive() {
        // Keep-alives carry no actionable data.
        debug!("keep-alive payload received");
    } else {
        // Unknown kinds are tolerated: the platform may introduce new ones.
        info!(kind = %payload.kind, "ignoring payload of unknown kind");
    }

    StatusCode::OK
}

fn dispatch(handler: &Option<PayloadHandler>, payload: Payload, kind: &'static str) {
    match handler {
        Some(f) => {
            let f = Arc::clone(f);
            // Fire-and-forget: the response must not wait on application logic.
            tokio::spawn(async move { f(payload) });
        }
        None => info!(kind, "no callback registered for payload"),
    }
}
