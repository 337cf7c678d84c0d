//! Domain model for the EchoTrace verification loop
//!
//! This crate contains pure data types with no I/O dependencies:
//! - Correlation tokens threaded through every hop of a probe cycle
//! - Destination addresses and registry parsing
//! - Request/response payloads for the method-invocation boundary
//! - Outbound and delivered message envelopes
//! - Per-destination invocation outcomes

pub mod correlation;
pub mod destination;
pub mod error;
pub mod message;
pub mod outcome;
pub mod payload;

pub use correlation::CorrelationToken;
pub use destination::{Destination, DestinationRegistry};
pub use error::DestinationParseError;
pub use message::{
    DeliveredMessage, OutboundMessage, CONTENT_ENCODING_UTF8, CONTENT_TYPE_JSON,
    CORRELATION_ID_PROPERTY, SCOPE_PROPERTY, TRAFFIC_SCOPE,
};
pub use outcome::InvocationOutcome;
pub use payload::{MethodReply, RequestPayload, ResponsePayload, NEW_MESSAGE_METHOD};
