//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept, connection limits)
//!     → connection.rs (peer info, HTTP/1.1 + HTTP/2, graceful watch)
//!     → Hand off to the axum router
//! ```
//!
//! # Design Decisions
//! - Bounded accept queue prevents resource exhaustion
//! - Each connection tracked for graceful shutdown

pub mod connection;
pub mod listener;

pub use listener::{ConnectionPermit, Listener, ListenerError};
