//! Telemetry and logging infrastructure for EchoTrace
//!
//! Every stage of the verification loop reports a [`TelemetryEvent`] through
//! a [`TelemetrySink`]. The numeric stage codes group events by pipeline
//! position (1xx dispatch, 2xx edge handler, 3xx ingestion); consumers rely
//! on that grouping to reconstruct a cycle from the event stream.

pub mod event;
pub mod logging;
pub mod sink;

pub use event::TelemetryEvent;
pub use sink::{InMemorySink, TelemetrySink, TracingSink};
