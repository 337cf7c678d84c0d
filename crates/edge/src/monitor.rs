//! Connection-resilience state machine
//!
//! The transport adapter pushes status changes into an event channel; the
//! monitor consumes them asynchronously, never polling. Every transition is
//! logged. Exactly one condition is fatal: the transport reporting that its
//! own reconnection attempts are exhausted. That terminates the process with
//! a distinguished exit code so an external supervisor restarts it from a
//! clean state; everything else is left to the transport's own recovery.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Exit code used when the transport's reconnection attempts are exhausted.
pub const RETRY_EXPIRED_EXIT_CODE: i32 = 70;

/// Connection state reported by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// Link is up
    Connected,
    /// Link is down, transport still retrying
    DisconnectedRetrying,
    /// Link is down and the transport has given up retrying
    DisconnectedExpired,
    /// Endpoint was disabled by the remote side
    Disabled,
    /// Connection was closed deliberately
    Closed,
}

/// Stated reason accompanying a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusReason {
    /// Connection established or re-established
    ConnectionOk,
    /// Transient communication error, transport retrying
    CommunicationError,
    /// The transport exhausted its reconnection attempts
    RetryExpired,
    /// Authentication material expired
    CredentialExpired,
    /// The endpoint was disabled remotely
    DeviceDisabled,
    /// The client closed the connection on purpose
    ClientClosed,
    /// No network route available
    NoNetwork,
}

impl StatusReason {
    /// Whether this reason is the terminal, unrecoverable one.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StatusReason::RetryExpired)
    }
}

impl fmt::Display for StatusReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusReason::ConnectionOk => "connection-ok",
            StatusReason::CommunicationError => "communication-error",
            StatusReason::RetryExpired => "retry-expired",
            StatusReason::CredentialExpired => "credential-expired",
            StatusReason::DeviceDisabled => "device-disabled",
            StatusReason::ClientClosed => "client-closed",
            StatusReason::NoNetwork => "no-network",
        };
        f.write_str(name)
    }
}

/// One status-change notification from the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEvent {
    /// New connection state
    pub state: ConnectionState,
    /// Stated reason for the transition
    pub reason: StatusReason,
}

impl ConnectionEvent {
    /// Build a status-change event.
    pub fn new(state: ConnectionState, reason: StatusReason) -> Self {
        Self { state, reason }
    }
}

/// Process-termination seam, so the fatal transition is testable.
pub trait ProcessTerminator: Send + Sync {
    /// Terminate the process with the given exit code.
    fn terminate(&self, exit_code: i32);
}

/// Production terminator: abrupt process exit, no drain.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExitTerminator;

impl ProcessTerminator for ExitTerminator {
    fn terminate(&self, exit_code: i32) {
        std::process::exit(exit_code);
    }
}

/// Monitor over a single long-lived transport connection.
pub struct ConnectionMonitor {
    events: mpsc::Receiver<ConnectionEvent>,
    terminator: Arc<dyn ProcessTerminator>,
}

impl ConnectionMonitor {
    /// Create a monitor consuming the given event channel.
    pub fn new(
        events: mpsc::Receiver<ConnectionEvent>,
        terminator: Arc<dyn ProcessTerminator>,
    ) -> Self {
        Self { events, terminator }
    }

    /// Consume status changes until the channel closes.
    ///
    /// Every transition is logged. A `retry-expired` reason invokes the
    /// terminator with [`RETRY_EXPIRED_EXIT_CODE`] and stops consuming; any
    /// other reason takes no process-level action.
    pub async fn run(mut self) {
        while let Some(event) = self.events.recv().await {
            info!(
                state = ?event.state,
                reason = %event.reason,
                "connection status changed"
            );

            if event.reason.is_fatal() {
                error!(
                    exit_code = RETRY_EXPIRED_EXIT_CODE,
                    "transport reconnection attempts exhausted, terminating for supervisor restart"
                );
                self.terminator.terminate(RETRY_EXPIRED_EXIT_CODE);
                return;
            }
        }

        debug!("connection status channel closed");
    }
}
