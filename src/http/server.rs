//! HTTP server setup and accept loop.
//!
//! # Responsibilities
//! - Create Axum Router with the webhook handler
//! - Wire up middleware (tracing, body limit, request ID)
//! - Accept connections until a stop is requested, backing off while the
//!   process is out of descriptors or memory
//! - On stop: close the listener, then drain in-flight connections
//!
//! The drain itself is unbounded; the lifecycle coordinator owns the
//! deadline and aborts this task (and with it every connection) when the
//! deadline passes.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::any;
use axum::Router;
use hyper_util::rt::TokioExecutor;
use hyper_util::server::conn::auto;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::task::JoinSet;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::actions::Dispatcher;
use crate::config::AppConfig;
use crate::http::handlers;
use crate::lifecycle::shutdown::StopSignal;
use crate::net::listener::next_backoff;
use crate::net::{connection, Listener, ListenerError};

/// Path the webhook is served on.
pub const WEBHOOK_PATH: &str = "/wh";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// Error type for the serving task.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Listener(#[from] ListenerError),
    #[error("server stopped without a shutdown request")]
    UnexpectedStop,
    #[error("server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// HTTP server for the webhook receiver.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: &AppConfig, dispatcher: Dispatcher) -> Self {
        Self {
            router: build_router(config, dispatcher),
        }
    }

    /// Run the accept loop on `listener` until `stop` fires, then drain.
    ///
    /// Returns `Ok(())` only after a requested stop has fully drained.
    pub async fn run(self, listener: Listener, mut stop: StopSignal) -> Result<(), ServerError> {
        let addr = listener.local_addr().map_err(ListenerError::Accept)?;
        tracing::info!(address = %addr, "HTTP server starting");

        // HTTP/1 only: every request then runs inside its connection task,
        // which the coordinator can abort.
        let builder = auto::Builder::new(TokioExecutor::new()).http1_only();
        let graceful = GracefulShutdown::new();
        let mut connections = JoinSet::new();
        let mut backoff: Option<Duration> = None;

        loop {
            tokio::select! {
                biased;

                _ = stop.requested() => break,

                accepted = listener.accept() => {
                    let (stream, peer, permit) = match accepted {
                        Ok(conn) => {
                            backoff = None;
                            conn
                        }
                        Err(e) if e.is_transient() => {
                            tracing::warn!(error = %e, "Transient accept error");
                            continue;
                        }
                        Err(e) if e.is_resource_exhausted() => {
                            let delay = next_backoff(backoff);
                            backoff = Some(delay);
                            tracing::warn!(
                                error = %e,
                                retry_in_ms = delay.as_millis() as u64,
                                "Accept failed, resources exhausted"
                            );
                            tokio::select! {
                                _ = stop.requested() => break,
                                _ = tokio::time::sleep(delay) => continue,
                            }
                        }
                        Err(e) => return Err(e.into()),
                    };
                    connections.spawn(connection::serve(
                        &builder,
                        &graceful,
                        self.router.clone(),
                        stream,
                        peer,
                        permit,
                    ));
                }

                Some(joined) = connections.join_next(), if !connections.is_empty() => {
                    if let Err(e) = joined {
                        tracing::error!(error = %e, "Connection task failed");
                    }
                }
            }
        }

        drop(listener);
        tracing::info!(in_flight = connections.len(), "Stopped accepting, draining connections");

        graceful.shutdown().await;
        while connections.join_next().await.is_some() {}

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
///
/// No request timeout: dispatch lasts as long as the command it runs.
pub fn build_router(config: &AppConfig, dispatcher: Dispatcher) -> Router {
    let state = AppState {
        dispatcher: Arc::new(dispatcher),
    };

    Router::new()
        .route(WEBHOOK_PATH, any(handlers::webhook))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
