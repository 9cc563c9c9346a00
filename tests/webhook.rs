//! End-to-end webhook requests over a real socket.

use std::sync::Arc;
use std::time::Duration;

use airdrop::lifecycle::{Outcome, Signal};

mod common;

use common::{client, Harness, StubExecutor};

#[tokio::test]
async fn open_succeeds_with_stub_executor() {
    let exec = Arc::new(StubExecutor::succeeding());
    let harness = Harness::start(exec.clone(), Duration::from_secs(5)).await;

    let res = client()
        .post(harness.url())
        .body(r#"{"content":"https://example.com","action":"open"}"#)
        .send()
        .await
        .expect("server reachable");

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"success":true,"message":"Opened text: https://example.com"}"#
    );
    assert_eq!(exec.calls(), vec![vec!["xdg-open", "https://example.com"]]);

    harness.signal(Signal::Terminate).await;
    assert!(matches!(harness.finish().await, Outcome::Graceful));
}

#[tokio::test]
async fn open_failure_is_reported_in_band() {
    let harness = Harness::start(Arc::new(StubExecutor::failing()), Duration::from_secs(5)).await;

    let res = client()
        .post(harness.url())
        .header("content-type", "application/json")
        .body(r#"{"content":"https://example.com","action":"open"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({"success": false, "message": "Error opening text: https://example.com"})
    );

    harness.signal(Signal::Interrupt).await;
    harness.finish().await;
}

#[tokio::test]
async fn unknown_action_and_transport_errors() {
    let exec = Arc::new(StubExecutor::succeeding());
    let harness = Harness::start(exec.clone(), Duration::from_secs(5)).await;
    let client = client();

    let res = client
        .post(harness.url())
        .body(r#"{"action":"dance"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"success":false,"message":"Unknown action: dance"}"#
    );

    let res = client.get(harness.url()).send().await.unwrap();
    assert_eq!(res.status(), 405);
    assert_eq!(res.text().await.unwrap(), "Method Not Allowed");

    let res = client.post(harness.url()).body("{oops").send().await.unwrap();
    assert_eq!(res.status(), 400);
    assert_eq!(res.text().await.unwrap(), "Error decoding JSON");

    // Legacy payload field name.
    let res = client
        .post(harness.url())
        .header("x-forwarded-for", "203.0.113.9")
        .body(r#"{"text":"notes.txt","action":"open"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(exec.calls(), vec![vec!["xdg-open", "notes.txt"]]);

    harness.signal(Signal::Hangup).await;
    assert!(matches!(harness.finish().await, Outcome::Graceful));
}

#[tokio::test]
async fn http2_connections_are_refused() {
    let exec = Arc::new(StubExecutor::succeeding());
    let harness = Harness::start(exec.clone(), Duration::from_secs(5)).await;

    let h2 = reqwest::Client::builder()
        .no_proxy()
        .http2_prior_knowledge()
        .build()
        .unwrap();
    let res = h2
        .post(harness.url())
        .body(r#"{"content":"https://example.com","action":"open"}"#)
        .send()
        .await;
    assert!(res.is_err(), "HTTP/2 request was served: {res:?}");
    assert!(exec.calls().is_empty());

    let res = client()
        .post(harness.url())
        .body(r#"{"content":"https://example.com","action":"open"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    harness.signal(Signal::Terminate).await;
    assert!(matches!(harness.finish().await, Outcome::Graceful));
}
