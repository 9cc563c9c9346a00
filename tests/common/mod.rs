//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;

use airdrop::actions::{Dispatcher, Platform};
use airdrop::config::{AppConfig, ListenerConfig};
use airdrop::exec::{ExecError, Executor};
use airdrop::http::HttpServer;
use airdrop::lifecycle::{Coordinator, Outcome, Signal};
use airdrop::net::Listener;
use airdrop::observability::LogSink;

/// Executor that records calls and answers with a fixed result.
#[derive(Default)]
pub struct StubExecutor {
    pub fail: bool,
    pub calls: Mutex<Vec<Vec<String>>>,
}

impl StubExecutor {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for StubExecutor {
    async fn execute(&self, args: &[String]) -> Result<(), ExecError> {
        self.calls.lock().unwrap().push(args.to_vec());
        if self.fail {
            return Err(ExecError::Spawn {
                program: args[0].clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "stub"),
            });
        }
        Ok(())
    }
}

/// Executor that announces each call and then takes `hold` (or forever).
pub struct SlowExecutor {
    pub started: Arc<Notify>,
    pub hold: Option<Duration>,
}

impl SlowExecutor {
    pub fn holding(hold: Duration) -> Self {
        Self {
            started: Arc::new(Notify::new()),
            hold: Some(hold),
        }
    }

    pub fn stuck() -> Self {
        Self {
            started: Arc::new(Notify::new()),
            hold: None,
        }
    }
}

#[async_trait]
impl Executor for SlowExecutor {
    async fn execute(&self, _args: &[String]) -> Result<(), ExecError> {
        self.started.notify_one();
        match self.hold {
            Some(hold) => tokio::time::sleep(hold).await,
            None => std::future::pending::<()>().await,
        }
        Ok(())
    }
}

/// A running coordinator on a loopback port, driven by a signal channel.
pub struct Harness {
    pub addr: SocketAddr,
    pub signals: mpsc::Sender<Signal>,
    pub run: JoinHandle<Outcome>,
    pub log_dir: PathBuf,
}

impl Harness {
    pub async fn start(executor: Arc<dyn Executor>, shutdown_timeout: Duration) -> Self {
        let log_dir = std::env::temp_dir().join(format!("airdrop-test-{}", uuid::Uuid::new_v4()));
        let log = LogSink::open(&log_dir.join("airdrop.json")).expect("open log sink");

        let config = AppConfig {
            listener: ListenerConfig {
                bind_address: "127.0.0.1:0".into(),
                max_connections: 64,
            },
            ..AppConfig::default()
        };
        let listener = Listener::bind(&config.listener).await.expect("bind loopback");
        let addr = listener.local_addr().unwrap();

        let dispatcher = Dispatcher::new(executor, "airdrop")
            .with_platform(Platform::Other)
            .with_notifications(false);
        let server = HttpServer::new(&config, dispatcher);

        let (signals, rx) = mpsc::channel(4);
        let coordinator =
            Coordinator::new(server, listener, log).with_shutdown_timeout(shutdown_timeout);
        let run = tokio::spawn(coordinator.run(rx));

        Self {
            addr,
            signals,
            run,
            log_dir,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/wh", self.addr)
    }

    pub async fn signal(&self, signal: Signal) {
        self.signals.send(signal).await.expect("coordinator listening");
    }

    /// Wait for the coordinator to return and clean up the temp log.
    pub async fn finish(self) -> Outcome {
        let outcome = tokio::time::timeout(Duration::from_secs(10), self.run)
            .await
            .expect("coordinator should return")
            .expect("coordinator task should not panic");
        let _ = std::fs::remove_dir_all(&self.log_dir);
        outcome
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
