//! TCP listener implementation with backpressure.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Accept incoming TCP connections
//! - Enforce max_connections limit via semaphore
//! - Classify accept errors as per-connection, resource exhaustion or fatal

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },
    /// Failed to accept connection.
    #[error("failed to accept: {0}")]
    Accept(#[source] io::Error),
}

/// First wait after an accept fails for lack of resources.
pub const MIN_ACCEPT_BACKOFF: Duration = Duration::from_millis(5);
/// Longest wait between accept retries.
pub const MAX_ACCEPT_BACKOFF: Duration = Duration::from_secs(1);

// ENOMEM, ENFILE, EMFILE, ENOBUFS
#[cfg(target_os = "linux")]
const RESOURCE_ERRNOS: &[i32] = &[12, 23, 24, 105];
#[cfg(all(unix, not(target_os = "linux")))]
const RESOURCE_ERRNOS: &[i32] = &[12, 23, 24, 55];
// WSAEMFILE, WSAENOBUFS
#[cfg(windows)]
const RESOURCE_ERRNOS: &[i32] = &[10024, 10055];
#[cfg(not(any(unix, windows)))]
const RESOURCE_ERRNOS: &[i32] = &[];

impl ListenerError {
    /// Errors that concern a single connection attempt, not the socket.
    pub fn is_transient(&self) -> bool {
        match self {
            ListenerError::Accept(e) => matches!(
                e.kind(),
                io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionRefused
                    | io::ErrorKind::Interrupted
                    | io::ErrorKind::WouldBlock
            ),
            ListenerError::Bind { .. } => false,
        }
    }

    /// The process ran out of descriptors, buffers or memory; retry after a pause.
    pub fn is_resource_exhausted(&self) -> bool {
        match self {
            ListenerError::Accept(e) => {
                e.kind() == io::ErrorKind::OutOfMemory
                    || e.raw_os_error().is_some_and(|code| RESOURCE_ERRNOS.contains(&code))
            }
            ListenerError::Bind { .. } => false,
        }
    }
}

/// Doubling delay between accept retries, capped at [`MAX_ACCEPT_BACKOFF`].
pub fn next_backoff(previous: Option<Duration>) -> Duration {
    match previous {
        None => MIN_ACCEPT_BACKOFF,
        Some(delay) => (delay * 2).min(MAX_ACCEPT_BACKOFF),
    }
}

/// A bounded TCP listener that limits concurrent connections.
///
/// When the limit is reached, accepting waits until a slot becomes available.
pub struct Listener {
    inner: TcpListener,
    connection_limit: Arc<Semaphore>,
}

impl Listener {
    /// Bind to the configured address with connection limits.
    pub async fn bind(config: &ListenerConfig) -> Result<Self, ListenerError> {
        let address = config.socket_address();
        let inner = TcpListener::bind(&address)
            .await
            .map_err(|source| ListenerError::Bind {
                address: address.clone(),
                source,
            })?;

        Ok(Self::from_tcp(inner, config.max_connections))
    }

    /// Wrap an already bound socket.
    pub fn from_tcp(inner: TcpListener, max_connections: usize) -> Self {
        Self {
            inner,
            connection_limit: Arc::new(Semaphore::new(max_connections)),
        }
    }

    /// Accept a new connection, respecting the connection limit.
    ///
    /// The returned permit must be held for the connection's lifetime.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr, ConnectionPermit), ListenerError> {
        // Acquire permit first (backpressure)
        let permit = Arc::clone(&self.connection_limit)
            .acquire_owned()
            .await
            .map_err(|_| ListenerError::Accept(io::Error::other("connection limit closed")))?;

        let (stream, addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;

        tracing::debug!(
            peer_addr = %addr,
            available_permits = self.connection_limit.available_permits(),
            "Connection accepted"
        );

        Ok((stream, addr, ConnectionPermit { _permit: permit }))
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }

    /// Get current available connection slots.
    pub fn available_permits(&self) -> usize {
        self.connection_limit.available_permits()
    }
}

/// A connection slot, released back to the listener on drop.
#[derive(Debug)]
pub struct ConnectionPermit {
    _permit: OwnedSemaphorePermit,
}
