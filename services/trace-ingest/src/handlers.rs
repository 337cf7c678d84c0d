use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use echotrace_domain::{DeliveredMessage, CORRELATION_ID_PROPERTY};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::state::AppState;

/// One inbound delivery from the routing fabric: raw body bytes plus the
/// delivery properties carried as headers. Observation is a side effect,
/// so the route always accepts.
pub async fn observe_delivery(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let mut properties = HashMap::new();
    for (name, value) in headers.iter() {
        if let Ok(value) = value.to_str() {
            // HTTP lowercases header names; restore the canonical key for
            // the one property this service inspects.
            let key = if name.as_str().eq_ignore_ascii_case(CORRELATION_ID_PROPERTY) {
                CORRELATION_ID_PROPERTY.to_string()
            } else {
                name.as_str().to_string()
            };
            properties.insert(key, value.to_string());
        }
    }

    let message = DeliveredMessage::new(body.to_vec(), properties);
    state.ingestor.observe(&message);

    (StatusCode::ACCEPTED, Json(json!({ "status": "observed" })))
}
