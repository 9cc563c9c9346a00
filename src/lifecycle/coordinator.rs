//! Process lifecycle: the race between the server and termination signals.
//!
//! ```text
//! STARTING → LISTENING ─┬─ signal ─────────▶ SHUTTING_DOWN ─┐
//!                       └─ server error ───▶ CRASHED ───────┴─▶ STOPPED (log sink closed)
//! ```

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::process::ExitCode;
use std::time::Duration;

use crate::http::{HttpServer, ServerError};
use crate::lifecycle::shutdown::{self, Shutdown, StopSignal, DEFAULT_TIMEOUT};
use crate::lifecycle::signals::SignalSource;
use crate::net::Listener;
use crate::observability::LogSink;

/// How the process came to stop.
#[derive(Debug)]
pub enum Outcome {
    /// Signal received, every connection drained before the deadline.
    Graceful,
    /// Signal received, connections were still open at the deadline and were aborted.
    ForcedShutdown,
    /// The server ended on its own.
    Crashed(ServerError),
}

impl Outcome {
    /// Shutdown problems are not escalated; only a crash is a failure.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Graceful | Outcome::ForcedShutdown => ExitCode::SUCCESS,
            Outcome::Crashed(_) => ExitCode::FAILURE,
        }
    }
}

type ServeFuture = Pin<Box<dyn Future<Output = Result<(), ServerError>> + Send>>;

/// Starts the serving task; it must return once the stop signal fires.
pub(crate) type ServeFn = Box<dyn FnOnce(StopSignal) -> ServeFuture + Send>;

/// Owns everything needed to run and stop the server exactly once.
pub struct Coordinator {
    serve: ServeFn,
    addr: Option<SocketAddr>,
    log: LogSink,
    shutdown_timeout: Duration,
}

impl Coordinator {
    pub fn new(server: HttpServer, listener: Listener, log: LogSink) -> Self {
        let addr = match listener.local_addr() {
            Ok(addr) => Some(addr),
            Err(e) => {
                tracing::warn!(error = %e, "Listener address unavailable");
                None
            }
        };
        let serve: ServeFn = Box::new(move |stop| -> ServeFuture { Box::pin(server.run(listener, stop)) });
        Self::with_serve(serve, addr, log)
    }

    pub(crate) fn with_serve(serve: ServeFn, addr: Option<SocketAddr>, log: LogSink) -> Self {
        Self {
            serve,
            addr,
            log,
            shutdown_timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Serve until a signal or a server failure, then release the log sink.
    pub async fn run<S>(self, mut signals: S) -> Outcome
    where
        S: SignalSource,
    {
        let Coordinator {
            serve,
            addr,
            log,
            shutdown_timeout,
        } = self;

        match addr {
            Some(addr) => tracing::info!(addr = %addr, "Starting server"),
            None => tracing::warn!("Starting server on unknown address"),
        }

        let trigger = Shutdown::new();
        let mut server_task = tokio::spawn(serve(trigger.subscribe()));

        let outcome = tokio::select! {
            joined = &mut server_task => match joined {
                Ok(Ok(())) => Outcome::Crashed(ServerError::UnexpectedStop),
                Ok(Err(e)) => Outcome::Crashed(e),
                Err(e) => Outcome::Crashed(ServerError::Task(e)),
            },

            Some(signal) = signals.recv() => {
                tracing::info!(signal = %signal, "Received signal, initiating graceful shutdown");
                shutdown::graceful(&trigger, server_task, shutdown_timeout, &mut signals).await
            }
        };

        match &outcome {
            Outcome::Graceful => tracing::info!("Server stopped gracefully"),
            Outcome::ForcedShutdown => tracing::warn!("Server stopped after forced shutdown"),
            Outcome::Crashed(e) => tracing::error!(error = %e, "Server error"),
        }

        if let Err(e) = log.close() {
            tracing::error!(error = %e, "Failed closing log file");
        }

        outcome
    }
}
