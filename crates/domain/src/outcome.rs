//! Per-destination invocation outcomes
//!
//! Every dispatch attempt concludes in exactly one outcome, created when the
//! attempt completes and never mutated afterwards. The three-way split gates
//! which telemetry category is emitted: a returned status is classified as
//! success or failure, a raised transport error is its own category.

use serde::{Deserialize, Serialize};

/// Outcome of one method invocation against one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvocationOutcome {
    /// The call returned a status in [200, 299]
    Success(u16),
    /// The call returned a status outside [200, 299]
    Failure(u16),
    /// The call itself raised a transport error (includes timeouts)
    Error(String),
}

impl InvocationOutcome {
    /// Classify a returned status code: [200, 299] inclusive is success.
    pub fn classify(status: u16) -> Self {
        if (200..=299).contains(&status) {
            InvocationOutcome::Success(status)
        } else {
            InvocationOutcome::Failure(status)
        }
    }

    /// Whether this outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationOutcome::Success(_))
    }

    /// The returned status code, if the call returned at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            InvocationOutcome::Success(status) | InvocationOutcome::Failure(status) => {
                Some(*status)
            }
            InvocationOutcome::Error(_) => None,
        }
    }
}
