use axum::routing::any;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::webhook::{receive_webhook, WebhookReceiver};

/// Build the router serving the inbound webhook endpoint at `path`.
///
/// The route accepts any method; the handler itself rejects non-POST with
/// 400, which is what the platform expects.
pub fn webhook_router(receiver: WebhookReceiver, path: &str) -> Router {
    Router::new()
        .route(path, any(receive_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(receiver)
}
