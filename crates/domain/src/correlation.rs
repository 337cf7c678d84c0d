//! Correlation tokens for cycle tracking
//!
//! A token is minted once per probe cycle and stamped on every hop so the
//! full round trip can be reconstructed from telemetry afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, globally-unique identifier for one probe cycle.
///
/// Immutable once created; the same value appears on every hop of the cycle
/// and is never reused by a later cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationToken(String);

impl CorrelationToken {
    /// Mint a fresh token (UUID v4 rendered as text).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The token value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CorrelationToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CorrelationToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
