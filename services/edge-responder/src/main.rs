use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use echotrace_edge::{
    ConnectionMonitor, ExitTerminator, RequestHandler, TransportProtocol,
};
use echotrace_telemetry::{logging, TracingSink};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::info;

mod config;
mod hub;

use config::Config;
use hub::HubForwarder;

struct AppState {
    handler: RequestHandler,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(&config.log_level);

    let protocol = TransportProtocol::from_config(&config.transport_protocol);
    info!(protocol = %protocol, hub_url = %config.hub_url, "edge responder starting");

    let (status_tx, status_rx) = mpsc::channel(32);
    let forwarder = Arc::new(HubForwarder::new(
        &config.hub_url,
        config.hub_timeout,
        config.hub_max_retries,
        status_tx,
    )?);

    // The monitor outlives any single call; retry expiry terminates the
    // whole process so the supervisor restarts it from a clean state.
    let monitor = ConnectionMonitor::new(status_rx, Arc::new(ExitTerminator));
    tokio::spawn(monitor.run());

    let state = Arc::new(AppState {
        handler: RequestHandler::new(
            config.handler_id.clone(),
            forwarder,
            Arc::new(TracingSink::new()),
        ),
    });

    let app = Router::new()
        .route("/methods/:name", post(invoke_method))
        .with_state(state);

    let bind_addr = format!("0.0.0.0:{}", config.listen_port);
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("edge responder listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}

async fn invoke_method(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> (StatusCode, Json<echotrace_domain::ResponsePayload>) {
    let reply = state.handler.dispatch_method(&name, &body).await;
    let status =
        StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(reply.payload))
}
