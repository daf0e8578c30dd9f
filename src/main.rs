use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sakura_iot::config::Config;
use sakura_iot::handlers::webhook::WebhookReceiver;
use sakura_iot::router::webhook_router;

/// Echo server: logs every payload posted by the platform.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sakura_iot=debug,tower_http=debug".into()),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let receiver = WebhookReceiver::new()
        .with_secret(config.secret.clone())
        .on_channels(|p| {
            info!(
                module = %p.module,
                channels = p.payload.channels.len(),
                "webhook payload received"
            );
            for c in &p.payload.channels {
                info!(channel = c.channel, tag = c.type_tag(), "channel value");
            }
        })
        .on_connection(|p| {
            info!(module = %p.module, "module connected");
        });

    let app = webhook_router(receiver, &config.path);

    let addr: SocketAddr = format!("{}:{}", config.hostname, config.port).parse()?;
    info!(
        addr = %addr,
        path = %config.path,
        signature_check = !config.secret.is_empty(),
        "starting echo server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
