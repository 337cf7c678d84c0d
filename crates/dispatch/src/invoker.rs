//! Method-invocation boundary
//!
//! The transport that actually reaches an endpoint lives behind
//! [`MethodInvoker`]; the dispatcher only sees a reply or an [`InvokeError`].

use async_trait::async_trait;
use echotrace_domain::{Destination, MethodReply, RequestPayload};
use thiserror::Error;

/// Errors raised by the transport while invoking a method.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The endpoint could not be reached
    #[error("Connection to {destination} failed: {reason}")]
    Connection {
        /// Target destination
        destination: String,
        /// Transport-reported reason
        reason: String,
    },

    /// The transport gave up waiting for a response
    #[error("Invocation of {destination} timed out")]
    Timeout {
        /// Target destination
        destination: String,
    },

    /// The endpoint replied with something that is not a method reply
    #[error("Malformed reply from {destination}: {reason}")]
    MalformedReply {
        /// Target destination
        destination: String,
        /// Parse failure description
        reason: String,
    },
}

/// Transport client capable of invoking a named method on a destination.
#[async_trait]
pub trait MethodInvoker: Send + Sync {
    /// Invoke `method` on `destination` with the given payload.
    async fn invoke(
        &self,
        destination: &Destination,
        method: &str,
        payload: &RequestPayload,
    ) -> Result<MethodReply, InvokeError>;
}
