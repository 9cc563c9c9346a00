//! Shutdown coordination.
//!
//! [`Shutdown`] is the one-shot stop trigger shared with the accept loop.
//! [`graceful`] is the bounded shutdown routine: trigger the stop, wait for
//! the server task to drain, and abort it once the deadline passes.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::http::ServerError;
use crate::lifecycle::signals::SignalSource;
use crate::lifecycle::Outcome;

/// Default deadline for draining in-flight connections.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One-shot stop trigger.
///
/// Subscribers created before or after [`Shutdown::trigger`] both observe it.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> StopSignal {
        StopSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Request a stop. Later calls have no further effect.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half of [`Shutdown`].
#[derive(Debug, Clone)]
pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

impl StopSignal {
    /// Resolves once a stop is requested (or the trigger is dropped).
    pub async fn requested(&mut self) {
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }
}

/// Stop the server and wait up to `timeout` for it to drain.
///
/// Signals arriving meanwhile are logged and ignored; a started shutdown
/// always runs to completion or to its deadline.
pub async fn graceful<S>(
    shutdown: &Shutdown,
    mut server: JoinHandle<Result<(), ServerError>>,
    timeout: Duration,
    signals: &mut S,
) -> Outcome
where
    S: SignalSource + ?Sized,
{
    shutdown.trigger();

    let deadline = tokio::time::sleep(timeout);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            joined = &mut server => {
                return match joined {
                    Ok(Ok(())) => Outcome::Graceful,
                    Ok(Err(e)) => Outcome::Crashed(e),
                    Err(e) => Outcome::Crashed(ServerError::Task(e)),
                };
            }

            _ = &mut deadline => {
                tracing::error!(
                    timeout_secs = timeout.as_secs_f64(),
                    error = "deadline exceeded",
                    "Graceful shutdown failed, forcing remaining connections closed"
                );
                server.abort();
                // Wait for the abort so every connection task is gone on return.
                let _ = server.await;
                return Outcome::ForcedShutdown;
            }

            Some(signal) = signals.recv() => {
                tracing::warn!(signal = %signal, "Shutdown already in progress, ignoring signal");
            }
        }
    }
}
