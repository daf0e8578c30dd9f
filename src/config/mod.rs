use anyhow::Result;
use std::env;

/// Echo-server configuration, read from the environment. Every variable has
/// a default so the binary runs with no configuration at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub hostname: String,
    pub port: u16,
    pub path: String,
    /// Shared secret for signature verification; empty disables it.
    pub secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Config {
            hostname: env::var("SAKURA_IOT_ECHO_HOSTNAME")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SAKURA_IOT_ECHO_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SAKURA_IOT_ECHO_PORT must be a port number"))?,
            path: env::var("SAKURA_IOT_ECHO_PATH").unwrap_or_else(|_| "/".to_string()),
            secret: env::var("SAKURA_IOT_ECHO_SECRET").unwrap_or_default(),
        };

        if !config.path.starts_with('/') {
            return Err(anyhow::anyhow!(
                "SAKURA_IOT_ECHO_PATH must start with '/', got {:?}",
                config.path
            ));
        }

        Ok(config)
    }
}
