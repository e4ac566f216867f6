//! Centralized configuration (environment variables + defaults).

use std::time::Duration;

use anyhow::Context;

/// Runtime configuration, loaded once at startup and passed explicitly to
/// the components that need it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP surface binds to.
    pub bind_addr: String,
    /// SQLite database URL for the credential store (required).
    pub database_url: String,
    /// Remote action-dispatch endpoint URL (required).
    pub remote_endpoint: String,
    /// Bound on every outbound remote call.
    pub remote_timeout: Duration,
    /// Object-storage bucket crop images are served from (required).
    pub image_bucket: String,
    /// Fixed sender address for outbound notifications (required).
    pub notify_sender: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let remote_endpoint = std::env::var("API_ENDPOINT").context("API_ENDPOINT must be set")?;
        let remote_timeout = match std::env::var("REMOTE_TIMEOUT_SECS") {
            Ok(v) => Duration::from_secs(
                v.parse::<u64>()
                    .context("REMOTE_TIMEOUT_SECS must be a valid u64")?
                    .max(1),
            ),
            Err(_) => Duration::from_secs(10),
        };
        let image_bucket = std::env::var("IMAGE_BUCKET").context("IMAGE_BUCKET must be set")?;
        let notify_sender = std::env::var("NOTIFY_SENDER").context("NOTIFY_SENDER must be set")?;

        Ok(Self {
            bind_addr,
            database_url,
            remote_endpoint,
            remote_timeout,
            image_bucket,
            notify_sender,
        })
    }
}
