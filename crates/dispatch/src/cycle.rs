//! Probe cycle execution with per-destination fan-out
//!
//! One cycle mints one correlation token, invokes every configured
//! destination exactly once, and aggregates the outcomes. A failing
//! destination never prevents attempts to the remaining ones, and there is
//! no retry inside a cycle; the next timer tick is an independent cycle with
//! its own token.

use crate::invoker::MethodInvoker;
use echotrace_domain::{
    CorrelationToken, Destination, InvocationOutcome, RequestPayload, NEW_MESSAGE_METHOD,
};
use echotrace_telemetry::{TelemetryEvent, TelemetrySink};
use futures_util::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::error;

/// Default per-call deadline.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Aggregated result of one probe cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    /// Token shared by every attempt in this cycle
    pub correlation_id: CorrelationToken,
    /// Per-destination outcomes, in registry order
    pub outcomes: Vec<(Destination, InvocationOutcome)>,
    /// Number of success outcomes
    pub success_count: usize,
    /// Number of failure outcomes (non-success status returned)
    pub failure_count: usize,
    /// Number of error outcomes (call raised or timed out)
    pub error_count: usize,
    /// Total destinations attempted
    pub total: usize,
}

impl CycleReport {
    /// Aggregate per-destination outcomes into a report.
    pub fn new(
        correlation_id: CorrelationToken,
        outcomes: Vec<(Destination, InvocationOutcome)>,
    ) -> Self {
        let success_count = outcomes.iter().filter(|(_, o)| o.is_success()).count();
        let failure_count = outcomes
            .iter()
            .filter(|(_, o)| matches!(o, InvocationOutcome::Failure(_)))
            .count();
        let error_count = outcomes
            .iter()
            .filter(|(_, o)| matches!(o, InvocationOutcome::Error(_)))
            .count();
        let total = outcomes.len();

        Self {
            correlation_id,
            outcomes,
            success_count,
            failure_count,
            error_count,
            total,
        }
    }

    /// Check if every destination succeeded.
    pub fn all_success(&self) -> bool {
        self.success_count == self.total
    }
}

/// Cloud-side fan-out dispatcher.
pub struct Dispatcher {
    invoker: Arc<dyn MethodInvoker>,
    telemetry: Arc<dyn TelemetrySink>,
    call_timeout: Duration,
}

impl Dispatcher {
    /// Create a dispatcher with the default call timeout.
    pub fn new(invoker: Arc<dyn MethodInvoker>, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self {
            invoker,
            telemetry,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Override the per-call deadline.
    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Run one probe cycle against the destination registry.
    ///
    /// Mints exactly one fresh token, sends the same payload to every
    /// destination concurrently, and returns the aggregated report. Outcomes
    /// keep registry order regardless of completion order.
    pub async fn run_cycle(&self, destinations: &[Destination], text: &str) -> CycleReport {
        let correlation_id = CorrelationToken::generate();
        let payload = RequestPayload::new(correlation_id.clone(), text);

        let attempts = destinations
            .iter()
            .map(|destination| self.attempt(destination, &payload));
        let outcomes = join_all(attempts).await;

        CycleReport::new(
            correlation_id,
            destinations.iter().cloned().zip(outcomes).collect(),
        )
    }

    /// Invoke one destination and classify the result.
    ///
    /// Emits invocation-started before awaiting and the matching concluded
    /// category afterwards; a raised transport error is logged here and
    /// produces neither succeeded nor failed telemetry.
    async fn attempt(
        &self,
        destination: &Destination,
        payload: &RequestPayload,
    ) -> InvocationOutcome {
        self.telemetry.record(TelemetryEvent::InvocationStarted {
            correlation_id: payload.correlation_id.clone(),
            destination: destination.clone(),
        });

        let call = self
            .invoker
            .invoke(destination, NEW_MESSAGE_METHOD, payload);

        let outcome = match timeout(self.call_timeout, call).await {
            Ok(Ok(reply)) => InvocationOutcome::classify(reply.status),
            Ok(Err(err)) => {
                error!(
                    correlation_id = payload.correlation_id.as_str(),
                    destination = %destination,
                    error = %err,
                    "invocation raised a transport error"
                );
                InvocationOutcome::Error(err.to_string())
            }
            Err(_) => {
                error!(
                    correlation_id = payload.correlation_id.as_str(),
                    destination = %destination,
                    timeout_secs = self.call_timeout.as_secs(),
                    "invocation exceeded the call timeout"
                );
                InvocationOutcome::Error(format!(
                    "invocation exceeded the {}s call timeout",
                    self.call_timeout.as_secs()
                ))
            }
        };

        match &outcome {
            InvocationOutcome::Success(status) => {
                self.telemetry.record(TelemetryEvent::InvocationSucceeded {
                    correlation_id: payload.correlation_id.clone(),
                    destination: destination.clone(),
                    status: *status,
                });
            }
            InvocationOutcome::Failure(status) => {
                self.telemetry.record(TelemetryEvent::InvocationFailed {
                    correlation_id: payload.correlation_id.clone(),
                    destination: destination.clone(),
                    status: *status,
                });
            }
            InvocationOutcome::Error(_) => {}
        }

        outcome
    }
}
