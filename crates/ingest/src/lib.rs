//! Cloud-side ingestion of delivered probe messages
//!
//! The ingestor is invoked once per inbound delivery. A message carrying a
//! correlation identifier produces exactly one terminal observation event;
//! a message without one is expected non-probe traffic and only warrants a
//! warning. Redelivered messages are simply observed again; deduplication
//! belongs to whoever analyzes the event stream.

use chrono::Utc;
use echotrace_domain::{CorrelationToken, DeliveredMessage};
use echotrace_telemetry::{TelemetryEvent, TelemetrySink};
use std::sync::Arc;
use tracing::warn;

/// Terminal observation point of the verification loop.
pub struct Ingestor {
    telemetry: Arc<dyn TelemetrySink>,
}

impl Ingestor {
    /// Create an ingestor reporting into the given sink.
    pub fn new(telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self { telemetry }
    }

    /// Observe one delivered message. Never fails.
    pub fn observe(&self, message: &DeliveredMessage) {
        match message.correlation_id() {
            Some(correlation_id) => {
                self.telemetry.record(TelemetryEvent::MessageObserved {
                    correlation_id: CorrelationToken::from(correlation_id),
                    observed_at: Utc::now(),
                });
            }
            None => {
                warn!(
                    body_len = message.body.len(),
                    "delivered message carries no correlation identifier"
                );
            }
        }
    }
}
