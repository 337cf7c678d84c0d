//! Edge Hub forwarder
//!
//! Thin transport adapter: posts outbound messages to the hub and owns the
//! connection-status bookkeeping for that link. Consecutive send failures
//! count against the retry budget; exhausting it reports `retry-expired`,
//! which the connection monitor treats as fatal. The monitor itself never
//! sees the bookkeeping, only the resulting status events.

use async_trait::async_trait;
use echotrace_domain::OutboundMessage;
use echotrace_edge::{
    ChannelError, ConnectionEvent, ConnectionState, OutboundChannel, StatusReason,
};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

pub struct HubForwarder {
    client: reqwest::Client,
    hub_url: String,
    max_retries: u32,
    consecutive_failures: AtomicU32,
    connected: AtomicBool,
    events: mpsc::Sender<ConnectionEvent>,
}

impl HubForwarder {
    pub fn new(
        hub_url: &str,
        timeout: Duration,
        max_retries: u32,
        events: mpsc::Sender<ConnectionEvent>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            hub_url: hub_url.trim_end_matches('/').to_string(),
            max_retries,
            consecutive_failures: AtomicU32::new(0),
            connected: AtomicBool::new(true),
            events,
        })
    }

    async fn report(&self, event: ConnectionEvent) {
        // Monitor gone means the process is already on its way down.
        let _ = self.events.send(event).await;
    }

    async fn record_success(&self) {
        self.consecutive_failures.store(0, Ordering::SeqCst);
        if !self.connected.swap(true, Ordering::SeqCst) {
            self.report(ConnectionEvent::new(
                ConnectionState::Connected,
                StatusReason::ConnectionOk,
            ))
            .await;
        }
    }

    async fn record_failure(&self, reason: &str) {
        self.connected.store(false, Ordering::SeqCst);
        let failures = self.consecutive_failures.fetch_add(1, Ordering::SeqCst) + 1;

        if failures >= self.max_retries {
            warn!(failures, reason, "hub retry budget exhausted");
            self.report(ConnectionEvent::new(
                ConnectionState::DisconnectedExpired,
                StatusReason::RetryExpired,
            ))
            .await;
        } else {
            warn!(failures, reason, "hub send failed, still retrying");
            self.report(ConnectionEvent::new(
                ConnectionState::DisconnectedRetrying,
                StatusReason::CommunicationError,
            ))
            .await;
        }
    }
}

#[async_trait]
impl OutboundChannel for HubForwarder {
    async fn send(&self, message: OutboundMessage) -> Result<(), ChannelError> {
        let result = self
            .client
            .post(format!("{}/messages", self.hub_url))
            .json(&message)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match result {
            Ok(_) => {
                self.record_success().await;
                Ok(())
            }
            Err(err) => {
                let reason = err.to_string();
                self.record_failure(&reason).await;
                Err(ChannelError::SendFailed(reason))
            }
        }
    }
}
