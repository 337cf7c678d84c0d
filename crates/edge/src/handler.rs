//! Endpoint-side request handling
//!
//! The handler is invoked once per remote call. The method name is resolved
//! before the body is parsed, so an unrecognized name answers 404 for any
//! payload, including malformed JSON. A recognized call deserializes the
//! request, stamps the correlation token onto an outbound message, and
//! forwards it; forwarding failure is a 500 reply, never a crash.

use async_trait::async_trait;
use echotrace_domain::{
    MethodReply, OutboundMessage, RequestPayload, NEW_MESSAGE_METHOD,
};
use echotrace_telemetry::{TelemetryEvent, TelemetrySink};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Errors raised by the outbound channel while forwarding a message.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The channel rejected or failed to deliver the message
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// The channel is no longer usable
    #[error("Channel closed")]
    Closed,
}

/// Output channel the handler forwards probe messages through.
#[async_trait]
pub trait OutboundChannel: Send + Sync {
    /// Forward one message into the routing fabric.
    async fn send(&self, message: OutboundMessage) -> Result<(), ChannelError>;
}

/// Endpoint-side handler for method invocations.
pub struct RequestHandler {
    handler_id: String,
    channel: Arc<dyn OutboundChannel>,
    telemetry: Arc<dyn TelemetrySink>,
    invocations: AtomicU64,
}

impl RequestHandler {
    /// Create a handler with the given identity.
    pub fn new(
        handler_id: impl Into<String>,
        channel: Arc<dyn OutboundChannel>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            handler_id: handler_id.into(),
            channel,
            telemetry,
            invocations: AtomicU64::new(0),
        }
    }

    /// Total invocations served so far (observability only).
    pub fn invocation_count(&self) -> u64 {
        self.invocations.load(Ordering::Relaxed)
    }

    /// Route one inbound method invocation.
    ///
    /// Any method name other than the recognized one answers 404 with a body
    /// naming the method, before the payload is even looked at.
    pub async fn dispatch_method(&self, method: &str, body: &[u8]) -> MethodReply {
        let sequence = self.invocations.fetch_add(1, Ordering::Relaxed) + 1;

        if method != NEW_MESSAGE_METHOD {
            debug!(method, sequence, "unrecognized method name");
            return MethodReply::new(404, format!("Method {method} not implemented"));
        }

        let request: RequestPayload = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(err) => {
                warn!(sequence, error = %err, "request payload failed to deserialize");
                return MethodReply::new(400, format!("Malformed request payload: {err}"));
            }
        };

        self.handle(request).await
    }

    /// Handle a parsed request: emit the correlated outbound message.
    async fn handle(&self, request: RequestPayload) -> MethodReply {
        self.telemetry.record(TelemetryEvent::RequestReceived {
            correlation_id: request.correlation_id.clone(),
            handler_id: self.handler_id.clone(),
        });

        let message =
            OutboundMessage::probe(request.text.into_bytes(), &request.correlation_id);

        match self.channel.send(message).await {
            Ok(()) => {
                self.telemetry.record(TelemetryEvent::ForwardSucceeded {
                    correlation_id: request.correlation_id,
                });
                MethodReply::new(200, "Message sent successfully to Edge Hub")
            }
            Err(err) => {
                error!(
                    correlation_id = request.correlation_id.as_str(),
                    error = %err,
                    "failed to forward message to Edge Hub"
                );
                self.telemetry.record(TelemetryEvent::ForwardFailed {
                    correlation_id: request.correlation_id,
                });
                MethodReply::new(500, format!("Failed to send message to Edge Hub: {err}"))
            }
        }
    }
}
