//! Message envelopes at the routing-fabric boundary
//!
//! The edge handler emits an [`OutboundMessage`] into the routing fabric;
//! the ingestion side receives a [`DeliveredMessage`] once per delivery.
//! The only property this system inspects on the way back in is the
//! correlation identifier.

use crate::correlation::CorrelationToken;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Message property carrying the correlation token.
pub const CORRELATION_ID_PROPERTY: &str = "correlationId";

/// Message property tagging probe traffic.
pub const SCOPE_PROPERTY: &str = "scope";

/// Scope value that distinguishes probe traffic from real traffic.
pub const TRAFFIC_SCOPE: &str = "echotrace";

/// Content type stamped on every outbound message.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content encoding stamped on every outbound message.
pub const CONTENT_ENCODING_UTF8: &str = "utf-8";

/// Message forwarded by the edge handler into the routing fabric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Message body bytes
    pub body: Vec<u8>,
    /// Content type of the body
    pub content_type: String,
    /// Content encoding of the body
    pub content_encoding: String,
    /// Application properties consumed by the routing fabric
    pub properties: HashMap<String, String>,
}

impl OutboundMessage {
    /// Build a probe message: stamps the content headers, the correlation
    /// token, and the probe scope tag.
    pub fn probe(body: impl Into<Vec<u8>>, correlation_id: &CorrelationToken) -> Self {
        let mut properties = HashMap::new();
        properties.insert(
            CORRELATION_ID_PROPERTY.to_string(),
            correlation_id.as_str().to_string(),
        );
        properties.insert(SCOPE_PROPERTY.to_string(), TRAFFIC_SCOPE.to_string());

        Self {
            body: body.into(),
            content_type: CONTENT_TYPE_JSON.to_string(),
            content_encoding: CONTENT_ENCODING_UTF8.to_string(),
            properties,
        }
    }

    /// The correlation token stamped on this message, if any.
    pub fn correlation_id(&self) -> Option<&str> {
        self.properties.get(CORRELATION_ID_PROPERTY).map(String::as_str)
    }
}

/// Message received once per inbound delivery at the ingestion point.
///
/// Read-only; redelivery semantics belong to the external transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveredMessage {
    /// Message body bytes
    pub body: Vec<u8>,
    /// Application properties as delivered
    pub properties: HashMap<String, String>,
}

impl DeliveredMessage {
    /// Create a delivered message from body and properties.
    pub fn new(body: impl Into<Vec<u8>>, properties: HashMap<String, String>) -> Self {
        Self {
            body: body.into(),
            properties,
        }
    }

    /// The optional correlation identifier property.
    pub fn correlation_id(&self) -> Option<&str> {
        self.properties.get(CORRELATION_ID_PROPERTY).map(String::as_str)
    }
}
