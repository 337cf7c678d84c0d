use anyhow::Context;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_port: u16,
    pub hub_url: String,
    pub hub_timeout: Duration,
    pub hub_max_retries: u32,
    pub transport_protocol: String,
    pub handler_id: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            listen_port: env::var("LISTEN_PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(8080),
            hub_url: env::var("HUB_URL").context("HUB_URL must be set")?,
            hub_timeout: Duration::from_secs(
                env::var("HUB_TIMEOUT_SECS")
                    .ok()
                    .and_then(|raw| raw.parse().ok())
                    .unwrap_or(10),
            ),
            hub_max_retries: env::var("HUB_MAX_RETRIES")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(5),
            transport_protocol: env::var("TRANSPORT_PROTOCOL").unwrap_or_default(),
            handler_id: env::var("HANDLER_ID").unwrap_or_else(|_| "edge-responder".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_default(),
        })
    }
}
