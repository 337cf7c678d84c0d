//! Connection monitor tests: recoverable vs fatal transitions

use crate::test_utils::{MemoryChannel, RecordingTerminator};
use echotrace_domain::NEW_MESSAGE_METHOD;
use echotrace_edge::{
    ConnectionEvent, ConnectionMonitor, ConnectionState, RequestHandler, StatusReason,
    RETRY_EXPIRED_EXIT_CODE,
};
use echotrace_telemetry::InMemorySink;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_retry_expired_terminates_within_bounded_time() {
    let (tx, rx) = mpsc::channel(8);
    let terminator = RecordingTerminator::new();
    let monitor = ConnectionMonitor::new(rx, terminator.clone());
    let running = tokio::spawn(monitor.run());

    tx.send(ConnectionEvent::new(
        ConnectionState::DisconnectedExpired,
        StatusReason::RetryExpired,
    ))
    .await
    .unwrap();

    tokio::time::timeout(Duration::from_secs(5), running)
        .await
        .expect("monitor must conclude after the fatal event")
        .unwrap();

    assert_eq!(terminator.codes(), vec![RETRY_EXPIRED_EXIT_CODE]);
}

#[tokio::test]
async fn test_non_fatal_reasons_leave_the_handler_serving() {
    let (tx, rx) = mpsc::channel(16);
    let terminator = RecordingTerminator::new();
    let monitor = ConnectionMonitor::new(rx, terminator.clone());
    let running = tokio::spawn(monitor.run());

    let channel = MemoryChannel::new();
    let handler = RequestHandler::new(
        "edge-responder",
        channel,
        Arc::new(InMemorySink::new()),
    );

    let benign = [
        ConnectionEvent::new(ConnectionState::Connected, StatusReason::ConnectionOk),
        ConnectionEvent::new(
            ConnectionState::DisconnectedRetrying,
            StatusReason::CommunicationError,
        ),
        ConnectionEvent::new(
            ConnectionState::DisconnectedRetrying,
            StatusReason::NoNetwork,
        ),
        ConnectionEvent::new(
            ConnectionState::DisconnectedRetrying,
            StatusReason::CredentialExpired,
        ),
        ConnectionEvent::new(ConnectionState::Disabled, StatusReason::DeviceDisabled),
        ConnectionEvent::new(ConnectionState::Closed, StatusReason::ClientClosed),
    ];
    for event in benign {
        tx.send(event).await.unwrap();

        // The process keeps serving calls after every benign transition.
        let reply = handler
            .dispatch_method(
                NEW_MESSAGE_METHOD,
                br#"{"correlationId":"alive","text":"ping"}"#,
            )
            .await;
        assert_eq!(reply.status, 200);
    }

    drop(tx);
    tokio::time::timeout(Duration::from_secs(5), running)
        .await
        .expect("monitor must conclude once the channel closes")
        .unwrap();

    assert!(terminator.codes().is_empty());
}
