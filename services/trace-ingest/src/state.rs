use echotrace_ingest::Ingestor;
use echotrace_telemetry::TracingSink;
use std::sync::Arc;

pub struct AppState {
    pub ingestor: Ingestor,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            ingestor: Ingestor::new(Arc::new(TracingSink::new())),
        }
    }
}
