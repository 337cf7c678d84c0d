//! Transport protocol selection

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Transport protocol used by the edge client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TransportProtocol {
    /// AMQP over TCP (default)
    #[default]
    Amqp,
    /// MQTT over TCP
    Mqtt,
}

impl TransportProtocol {
    /// Resolve the configured selector.
    ///
    /// Recognizes `amqp` and `mqtt` (case-insensitive); anything else falls
    /// back to the default with a logged warning.
    pub fn from_config(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "amqp" => TransportProtocol::Amqp,
            "mqtt" => TransportProtocol::Mqtt,
            other => {
                warn!(
                    configured = other,
                    "unrecognized transport protocol, defaulting to amqp"
                );
                TransportProtocol::default()
            }
        }
    }
}

impl fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportProtocol::Amqp => f.write_str("amqp"),
            TransportProtocol::Mqtt => f.write_str("mqtt"),
        }
    }
}
