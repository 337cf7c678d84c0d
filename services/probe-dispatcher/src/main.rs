use echotrace_dispatch::Dispatcher;
use echotrace_domain::DestinationRegistry;
use echotrace_telemetry::{logging, TracingSink};
use std::sync::Arc;
use tracing::{error, info};

mod config;
mod invoker;

use config::Config;
use invoker::HttpMethodInvoker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(&config.log_level);

    // Parsed once at startup; rejects are reported here, never per tick,
    // and never block the well-formed entries.
    let registry = DestinationRegistry::parse(&config.destinations);
    for reject in registry.rejected() {
        error!(error = %reject, "destination entry rejected");
    }
    anyhow::ensure!(
        !registry.is_empty(),
        "destination registry has no usable entries"
    );

    let destinations = Arc::new(registry.into_destinations());
    info!(
        count = destinations.len(),
        interval_secs = config.probe_interval.as_secs(),
        "destination registry loaded"
    );

    let invoker = Arc::new(HttpMethodInvoker::new(
        &config.gateway_url,
        config.response_timeout,
    )?);
    let dispatcher = Arc::new(
        Dispatcher::new(invoker, Arc::new(TracingSink::new()))
            .with_call_timeout(config.call_timeout),
    );

    let mut trigger = tokio::time::interval(config.probe_interval);

    loop {
        tokio::select! {
            _ = trigger.tick() => {
                // Each tick is an independent cycle on its own task; a slow
                // cycle neither blocks nor cancels the next one.
                let dispatcher = Arc::clone(&dispatcher);
                let destinations = Arc::clone(&destinations);
                let text = config.probe_text.clone();

                tokio::spawn(async move {
                    let report = dispatcher.run_cycle(&destinations, &text).await;
                    info!(
                        correlation_id = report.correlation_id.as_str(),
                        success = report.success_count,
                        failure = report.failure_count,
                        error = report.error_count,
                        total = report.total,
                        "probe cycle concluded"
                    );
                });
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}
