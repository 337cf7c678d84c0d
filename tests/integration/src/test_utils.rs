//! Test fixtures for the end-to-end loop
//!
//! The fixtures wire the real components together over in-memory
//! collaborators: an invoker that routes calls straight into a
//! [`RequestHandler`], a capturing outbound channel standing in for the hub
//! link, and a recording terminator for the connection monitor.

use async_trait::async_trait;
use echotrace_dispatch::{InvokeError, MethodInvoker};
use echotrace_domain::{
    DeliveredMessage, Destination, MethodReply, OutboundMessage, RequestPayload,
};
use echotrace_edge::{ChannelError, OutboundChannel, ProcessTerminator, RequestHandler};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Outbound channel that captures every forwarded message.
#[derive(Default)]
pub struct MemoryChannel {
    sent: Mutex<Vec<OutboundMessage>>,
    failing: Mutex<bool>,
}

impl MemoryChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl OutboundChannel for MemoryChannel {
    async fn send(&self, message: OutboundMessage) -> Result<(), ChannelError> {
        if *self.failing.lock().unwrap() {
            return Err(ChannelError::SendFailed("memory channel failing".to_string()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// Invoker that routes every call straight into an edge request handler,
/// with selected destinations failing at the transport instead.
pub struct LoopbackInvoker {
    handler: Arc<RequestHandler>,
    unreachable: HashSet<String>,
    method_override: Option<String>,
}

impl LoopbackInvoker {
    pub fn new(handler: Arc<RequestHandler>) -> Self {
        Self {
            handler,
            unreachable: HashSet::new(),
            method_override: None,
        }
    }

    /// Make one destination fail with a transport error.
    pub fn unreachable(mut self, destination: &str) -> Self {
        self.unreachable.insert(destination.to_string());
        self
    }

    /// Invoke a different method name than the dispatcher asked for.
    pub fn with_method(mut self, method: &str) -> Self {
        self.method_override = Some(method.to_string());
        self
    }
}

#[async_trait]
impl MethodInvoker for LoopbackInvoker {
    async fn invoke(
        &self,
        destination: &Destination,
        method: &str,
        payload: &RequestPayload,
    ) -> Result<MethodReply, InvokeError> {
        if self.unreachable.contains(&destination.to_string()) {
            return Err(InvokeError::Connection {
                destination: destination.to_string(),
                reason: "connection refused".to_string(),
            });
        }

        let method = self.method_override.as_deref().unwrap_or(method);
        let body = serde_json::to_vec(payload).expect("payload serializes");
        Ok(self.handler.dispatch_method(method, &body).await)
    }
}

/// Simulate the routing fabric: what the edge emitted arrives at ingestion
/// with body and properties intact.
pub fn deliver(message: &OutboundMessage) -> DeliveredMessage {
    DeliveredMessage::new(message.body.clone(), message.properties.clone())
}

/// Terminator that records exit codes instead of exiting the test runner.
#[derive(Default)]
pub struct RecordingTerminator {
    codes: Mutex<Vec<i32>>,
}

impl RecordingTerminator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn codes(&self) -> Vec<i32> {
        self.codes.lock().unwrap().clone()
    }
}

impl ProcessTerminator for RecordingTerminator {
    fn terminate(&self, exit_code: i32) {
        self.codes.lock().unwrap().push(exit_code);
    }
}
