//! Structured logging initialization
//!
//! Log level comes from the service configuration (recognized severities:
//! fatal, error, warn, info, debug, verbose) with `RUST_LOG` taking
//! precedence when set. Unset or unrecognized values fall back to `info`.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a configured severity name to a tracing level.
///
/// `fatal` collapses onto `error` and `verbose` onto `trace`; matching is
/// case-insensitive. Returns `None` for anything unrecognized.
pub fn parse_severity(raw: &str) -> Option<Level> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "fatal" | "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "verbose" => Some(Level::TRACE),
        _ => None,
    }
}

/// Initialize the logging system with structured output.
///
/// `min_severity` is the configured minimum level; an empty or unrecognized
/// value defaults to `info`. `RUST_LOG` overrides the configured level when
/// present.
pub fn init(min_severity: &str) {
    let configured = parse_severity(min_severity);
    let fallback = configured.unwrap_or(Level::INFO);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback.to_string().to_ascii_lowercase()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .init();

    if configured.is_none() && !min_severity.trim().is_empty() {
        tracing::warn!(
            configured = min_severity,
            "unrecognized log severity, defaulting to info"
        );
    }
}
