//! Signal-driven shutdown of a running coordinator.

use std::sync::Arc;
use std::time::{Duration, Instant};

use airdrop::lifecycle::{Outcome, Signal};

mod common;

use common::{client, Harness, SlowExecutor, StubExecutor};

const OPEN: &str = r#"{"content":"https://example.com","action":"open"}"#;

#[tokio::test]
async fn idle_shutdown_finishes_before_deadline() {
    let deadline = Duration::from_secs(5);
    let harness = Harness::start(Arc::new(StubExecutor::succeeding()), deadline).await;
    let addr = harness.addr;

    let started = Instant::now();
    harness.signal(Signal::Terminate).await;
    let outcome = harness.finish().await;

    assert!(matches!(outcome, Outcome::Graceful));
    assert!(started.elapsed() < deadline);

    // Listener is gone.
    assert!(tokio::net::TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn in_flight_request_is_honoured() {
    let exec = Arc::new(SlowExecutor::holding(Duration::from_millis(300)));
    let started = Arc::clone(&exec.started);
    let harness = Harness::start(exec, Duration::from_secs(5)).await;

    let url = harness.url();
    let request = tokio::spawn(async move { client().post(url).body(OPEN).send().await });

    started.notified().await;
    harness.signal(Signal::Interrupt).await;

    let res = request.await.unwrap().expect("in-flight request completes");
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);

    assert!(matches!(harness.finish().await, Outcome::Graceful));
}

#[tokio::test]
async fn repeated_signals_do_not_interrupt_shutdown() {
    let exec = Arc::new(SlowExecutor::holding(Duration::from_millis(300)));
    let started = Arc::clone(&exec.started);
    let harness = Harness::start(exec, Duration::from_secs(5)).await;

    let url = harness.url();
    let request = tokio::spawn(async move { client().post(url).body(OPEN).send().await });

    started.notified().await;
    harness.signal(Signal::Terminate).await;
    harness.signal(Signal::Interrupt).await;
    harness.signal(Signal::Hangup).await;

    let res = request.await.unwrap().expect("in-flight request completes");
    assert_eq!(res.status(), 200);
    assert!(matches!(harness.finish().await, Outcome::Graceful));
}

#[tokio::test]
async fn stuck_request_is_forced_at_deadline() {
    let exec = Arc::new(SlowExecutor::stuck());
    let started = Arc::clone(&exec.started);
    let deadline = Duration::from_millis(300);
    let harness = Harness::start(exec, deadline).await;

    let url = harness.url();
    let request = tokio::spawn(async move { client().post(url).body(OPEN).send().await });

    started.notified().await;
    let shutdown_started = Instant::now();
    harness.signal(Signal::Terminate).await;
    let outcome = harness.finish().await;

    assert!(matches!(outcome, Outcome::ForcedShutdown));
    assert!(shutdown_started.elapsed() >= deadline);

    let result = tokio::time::timeout(Duration::from_secs(5), request)
        .await
        .expect("client should observe the forced close")
        .unwrap();
    assert!(result.is_err());
}
