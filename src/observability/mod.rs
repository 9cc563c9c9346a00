//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → logging.rs (JSON subscriber)
//!
//! Consumers:
//!     → log file (append-only, one JSON object per line)
//!     → stdout (same records)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through the HTTP trace span

pub mod logging;

pub use logging::{env_filter, LogError, LogSink};
