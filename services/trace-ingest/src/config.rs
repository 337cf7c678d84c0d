use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_port: u16,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            listen_port: env::var("LISTEN_PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(8090),
            log_level: env::var("LOG_LEVEL").unwrap_or_default(),
        }
    }
}
