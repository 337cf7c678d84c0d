//! Telemetry event taxonomy
//!
//! One event per observable stage of a probe cycle, each carrying the
//! correlation token that ties the stages together.

use chrono::{DateTime, Utc};
use echotrace_domain::{CorrelationToken, Destination};
use serde::{Deserialize, Serialize};

/// An observable stage of the verification loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum TelemetryEvent {
    /// Dispatch attempt begun for one destination
    InvocationStarted {
        correlation_id: CorrelationToken,
        destination: Destination,
    },
    /// Call returned a success status
    InvocationSucceeded {
        correlation_id: CorrelationToken,
        destination: Destination,
        status: u16,
    },
    /// Call returned a non-success status
    InvocationFailed {
        correlation_id: CorrelationToken,
        destination: Destination,
        status: u16,
    },
    /// Edge handler accepted a request
    RequestReceived {
        correlation_id: CorrelationToken,
        handler_id: String,
    },
    /// Edge handler forwarded the outbound message
    ForwardSucceeded { correlation_id: CorrelationToken },
    /// Edge handler failed to forward the outbound message
    ForwardFailed { correlation_id: CorrelationToken },
    /// Ingestion observed a correlated message
    MessageObserved {
        correlation_id: CorrelationToken,
        observed_at: DateTime<Utc>,
    },
}

impl TelemetryEvent {
    /// Numeric stage code: 1xx dispatch, 2xx edge handler, 3xx ingestion.
    pub fn stage_code(&self) -> u16 {
        match self {
            TelemetryEvent::InvocationStarted { .. } => 100,
            TelemetryEvent::InvocationSucceeded { .. } => 101,
            TelemetryEvent::InvocationFailed { .. } => 102,
            TelemetryEvent::RequestReceived { .. } => 200,
            TelemetryEvent::ForwardSucceeded { .. } => 201,
            TelemetryEvent::ForwardFailed { .. } => 202,
            TelemetryEvent::MessageObserved { .. } => 300,
        }
    }

    /// Stable event name used in structured log output.
    pub fn name(&self) -> &'static str {
        match self {
            TelemetryEvent::InvocationStarted { .. } => "invocation-started",
            TelemetryEvent::InvocationSucceeded { .. } => "invocation-succeeded",
            TelemetryEvent::InvocationFailed { .. } => "invocation-failed",
            TelemetryEvent::RequestReceived { .. } => "request-received",
            TelemetryEvent::ForwardSucceeded { .. } => "forward-succeeded",
            TelemetryEvent::ForwardFailed { .. } => "forward-failed",
            TelemetryEvent::MessageObserved { .. } => "message-observed",
        }
    }

    /// The correlation token this event belongs to.
    pub fn correlation_id(&self) -> &CorrelationToken {
        match self {
            TelemetryEvent::InvocationStarted { correlation_id, .. }
            | TelemetryEvent::InvocationSucceeded { correlation_id, .. }
            | TelemetryEvent::InvocationFailed { correlation_id, .. }
            | TelemetryEvent::RequestReceived { correlation_id, .. }
            | TelemetryEvent::ForwardSucceeded { correlation_id }
            | TelemetryEvent::ForwardFailed { correlation_id }
            | TelemetryEvent::MessageObserved { correlation_id, .. } => correlation_id,
        }
    }
}
