use anyhow::Context;
use std::env;
use std::time::Duration;

/// Default probe message text.
const DEFAULT_PROBE_TEXT: &str = "echotrace probe";

#[derive(Debug, Clone)]
pub struct Config {
    pub destinations: String,
    pub gateway_url: String,
    pub probe_interval: Duration,
    pub call_timeout: Duration,
    pub response_timeout: Duration,
    pub probe_text: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            destinations: env::var("DESTINATIONS")
                .context("DESTINATIONS must be set (comma-delimited device/module list)")?,
            gateway_url: env::var("GATEWAY_URL").context("GATEWAY_URL must be set")?,
            probe_interval: Duration::from_secs(parse_secs("PROBE_INTERVAL_SECS", 60)),
            call_timeout: Duration::from_secs(parse_secs("CALL_TIMEOUT_SECS", 10)),
            response_timeout: Duration::from_secs(parse_secs("RESPONSE_TIMEOUT_SECS", 10)),
            probe_text: env::var("PROBE_TEXT").unwrap_or_else(|_| DEFAULT_PROBE_TEXT.to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_default(),
        })
    }
}

fn parse_secs(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
