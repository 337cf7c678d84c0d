//! End-to-end pipeline tests: dispatcher → edge handler → ingestion

use crate::test_utils::{deliver, LoopbackInvoker, MemoryChannel};
use echotrace_dispatch::Dispatcher;
use echotrace_domain::{
    Destination, DestinationRegistry, InvocationOutcome, TRAFFIC_SCOPE,
};
use echotrace_edge::RequestHandler;
use echotrace_ingest::Ingestor;
use echotrace_telemetry::{InMemorySink, TelemetryEvent};
use std::sync::Arc;

struct Loop {
    dispatcher: Dispatcher,
    channel: Arc<MemoryChannel>,
    ingestor: Ingestor,
    sink: InMemorySink,
}

/// Wire the full loop over in-memory collaborators, with one shared
/// telemetry sink observing every stage.
fn build_loop(configure: impl FnOnce(LoopbackInvoker) -> LoopbackInvoker) -> Loop {
    let sink = InMemorySink::new();
    let channel = MemoryChannel::new();
    let handler = Arc::new(RequestHandler::new(
        "edge-responder",
        channel.clone(),
        Arc::new(sink.clone()),
    ));
    let invoker = configure(LoopbackInvoker::new(handler));
    let dispatcher = Dispatcher::new(Arc::new(invoker), Arc::new(sink.clone()));
    let ingestor = Ingestor::new(Arc::new(sink.clone()));

    Loop {
        dispatcher,
        channel,
        ingestor,
        sink,
    }
}

#[tokio::test]
async fn test_full_loop_carries_one_token_through_every_hop() {
    let destinations = DestinationRegistry::parse("dev1/mod1,dev2/mod2").into_destinations();
    let fixture = build_loop(|invoker| invoker);

    let report = fixture.dispatcher.run_cycle(&destinations, "hello").await;
    assert!(report.all_success());

    // Route everything the edge emitted back in through ingestion.
    let sent = fixture.channel.sent();
    assert_eq!(sent.len(), 2);
    for message in &sent {
        fixture.ingestor.observe(&deliver(message));
    }

    let token = report.correlation_id.as_str();
    let events = fixture.sink.events_for(token);

    // Two destinations: started/succeeded per destination on the dispatch
    // side, received/forwarded per call on the edge side, observed per
    // delivery at ingestion.
    let count_stage =
        |code: u16| events.iter().filter(|e| e.stage_code() == code).count();
    assert_eq!(count_stage(100), 2);
    assert_eq!(count_stage(101), 2);
    assert_eq!(count_stage(200), 2);
    assert_eq!(count_stage(201), 2);
    assert_eq!(count_stage(300), 2);

    // Every event of the cycle carries the one token; nothing leaked onto
    // another token.
    assert_eq!(fixture.sink.events().len(), events.len());

    for message in &sent {
        assert_eq!(message.correlation_id(), Some(token));
        assert_eq!(
            message.properties.get("scope").map(String::as_str),
            Some(TRAFFIC_SCOPE)
        );
        assert_eq!(message.body, b"hello");
    }
}

#[tokio::test]
async fn test_unreachable_destination_leaves_the_other_outcome_intact() {
    // dev1 succeeds, dev2 raises: both attempted, same token, started twice,
    // succeeded once, and no failed category for the raised error.
    let destinations = DestinationRegistry::parse("dev1/mod1,dev2/mod2").into_destinations();
    let fixture = build_loop(|invoker| invoker.unreachable("dev2/mod2"));

    let report = fixture.dispatcher.run_cycle(&destinations, "hello").await;

    assert_eq!(report.outcomes[0].1, InvocationOutcome::Success(200));
    assert!(matches!(report.outcomes[1].1, InvocationOutcome::Error(_)));
    assert_eq!(report.success_count, 1);
    assert_eq!(report.error_count, 1);

    let events = fixture.sink.events();
    let count_stage =
        |code: u16| events.iter().filter(|e| e.stage_code() == code).count();
    assert_eq!(count_stage(100), 2);
    assert_eq!(count_stage(101), 1);
    assert_eq!(count_stage(102), 0);

    for event in &events {
        assert_eq!(event.correlation_id(), &report.correlation_id);
    }
}

#[tokio::test]
async fn test_unknown_method_comes_back_as_404_failure() {
    let destinations = vec![Destination::new("dev1", "mod1")];
    let fixture = build_loop(|invoker| invoker.with_method("Unknown"));

    let report = fixture.dispatcher.run_cycle(&destinations, "hello").await;

    assert_eq!(report.outcomes[0].1, InvocationOutcome::Failure(404));
    // Nothing was forwarded, so nothing can arrive at ingestion.
    assert!(fixture.channel.sent().is_empty());
}

#[tokio::test]
async fn test_forward_failure_surfaces_as_500_failure_outcome() {
    let destinations = vec![Destination::new("dev1", "mod1")];
    let fixture = build_loop(|invoker| invoker);
    fixture.channel.set_failing(true);

    let report = fixture.dispatcher.run_cycle(&destinations, "hello").await;

    assert_eq!(report.outcomes[0].1, InvocationOutcome::Failure(500));

    let events = fixture.sink.events();
    let codes: Vec<u16> = events.iter().map(|e| e.stage_code()).collect();
    assert_eq!(codes, vec![100, 200, 202, 102]);
}

#[tokio::test]
async fn test_untagged_delivery_is_warned_not_observed() {
    let fixture = build_loop(|invoker| invoker);

    let untagged = echotrace_domain::DeliveredMessage::new(
        b"unrelated traffic".to_vec(),
        std::collections::HashMap::new(),
    );
    fixture.ingestor.observe(&untagged);

    assert!(fixture
        .sink
        .events()
        .iter()
        .all(|e| !matches!(e, TelemetryEvent::MessageObserved { .. })));
}

#[tokio::test]
async fn test_cycles_never_share_a_token() {
    let destinations = vec![Destination::new("dev1", "mod1")];
    let fixture = build_loop(|invoker| invoker);

    let first = fixture.dispatcher.run_cycle(&destinations, "hello").await;
    let second = fixture.dispatcher.run_cycle(&destinations, "hello").await;

    assert_ne!(first.correlation_id, second.correlation_id);

    // Each cycle's telemetry stays attributable to its own token.
    assert_eq!(
        fixture.sink.events_for(first.correlation_id.as_str()).len(),
        4
    );
    assert_eq!(
        fixture.sink.events_for(second.correlation_id.as_str()).len(),
        4
    );
}
