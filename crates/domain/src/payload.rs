//! Method-invocation payloads
//!
//! Wire contract for the remote-call boundary: a fixed method name, a JSON
//! request carrying the correlation token, and a JSON response carrying a
//! human-readable outcome description.

use crate::correlation::CorrelationToken;
use serde::{Deserialize, Serialize};

/// Method name recognized by the edge request handler.
pub const NEW_MESSAGE_METHOD: &str = "NewMessageRequest";

/// Body of the remote call, constructed by the dispatcher and consumed by
/// the edge request handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPayload {
    /// Correlation token for this cycle, propagated verbatim downstream
    #[serde(rename = "correlationId")]
    pub correlation_id: CorrelationToken,
    /// Message text echoed into the outbound message body
    pub text: String,
}

impl RequestPayload {
    /// Build a request for one cycle.
    pub fn new(correlation_id: CorrelationToken, text: impl Into<String>) -> Self {
        Self {
            correlation_id,
            text: text.into(),
        }
    }
}

/// Body returned by the edge request handler.
///
/// An absent description serializes to nothing (omit-if-empty semantics).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePayload {
    /// Human-readable outcome description
    #[serde(
        rename = "ModuleResponse",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub module_response: Option<String>,
}

impl ResponsePayload {
    /// Response with a description.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            module_response: Some(message.into()),
        }
    }
}

/// Status code plus response body, as returned through the transport from
/// one method invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodReply {
    /// Numeric status code; [200, 299] counts as success
    pub status: u16,
    /// Response body
    pub payload: ResponsePayload,
}

impl MethodReply {
    /// Build a reply from a status code and a description.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            payload: ResponsePayload::with_message(message),
        }
    }
}
