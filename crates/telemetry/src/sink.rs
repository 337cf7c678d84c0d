//! Telemetry sinks
//!
//! The loop components report events through the [`TelemetrySink`] trait;
//! what happens to them is the embedder's choice. [`TracingSink`] feeds the
//! structured logger, [`InMemorySink`] retains events for inspection.

use crate::event::TelemetryEvent;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Destination for telemetry events.
///
/// Implementations must tolerate interleaved events from overlapping cycles;
/// the correlation token on each event keeps them attributable.
pub trait TelemetrySink: Send + Sync {
    /// Record one event.
    fn record(&self, event: TelemetryEvent);
}

/// Sink that emits each event as a structured log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    /// Create a tracing-backed sink.
    pub fn new() -> Self {
        Self
    }
}

impl TelemetrySink for TracingSink {
    fn record(&self, event: TelemetryEvent) {
        let stage = event.stage_code();
        let name = event.name();
        let correlation_id = event.correlation_id().as_str();

        match &event {
            TelemetryEvent::InvocationFailed { destination, status, .. } => {
                warn!(
                    stage,
                    event = name,
                    correlation_id,
                    destination = %destination,
                    status,
                    "invocation returned non-success status"
                );
            }
            TelemetryEvent::ForwardFailed { .. } => {
                warn!(stage, event = name, correlation_id, "forward failed");
            }
            TelemetryEvent::InvocationStarted { destination, .. } => {
                info!(stage, event = name, correlation_id, destination = %destination, "invocation started");
            }
            TelemetryEvent::InvocationSucceeded { destination, status, .. } => {
                info!(
                    stage,
                    event = name,
                    correlation_id,
                    destination = %destination,
                    status,
                    "invocation succeeded"
                );
            }
            TelemetryEvent::RequestReceived { handler_id, .. } => {
                info!(
                    stage,
                    event = name,
                    correlation_id,
                    handler_id = handler_id.as_str(),
                    "request received"
                );
            }
            TelemetryEvent::ForwardSucceeded { .. } => {
                info!(stage, event = name, correlation_id, "forward succeeded");
            }
            TelemetryEvent::MessageObserved { observed_at, .. } => {
                info!(
                    stage,
                    event = name,
                    correlation_id,
                    observed_at = %observed_at.to_rfc3339(),
                    "message observed"
                );
            }
        }
    }
}

/// Sink that retains every event in memory.
///
/// Clones share the same buffer, so a copy can be handed to the loop while
/// the caller keeps one for assertions.
#[derive(Debug, Default, Clone)]
pub struct InMemorySink {
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, in arrival order.
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().expect("telemetry buffer poisoned").clone()
    }

    /// Events recorded for one correlation token, in arrival order.
    pub fn events_for(&self, correlation_id: &str) -> Vec<TelemetryEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.correlation_id().as_str() == correlation_id)
            .collect()
    }
}

impl TelemetrySink for InMemorySink {
    fn record(&self, event: TelemetryEvent) {
        self.events.lock().expect("telemetry buffer poisoned").push(event);
    }
}
