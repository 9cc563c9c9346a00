//! airdrop: a local webhook receiver that opens what it is sent.
//!
//! # Architecture Overview
//!
//! ```text
//!   POST /wh ──▶ net (listener, connection) ──▶ http (router, handler)
//!                                                   │
//!                                                   ▼
//!                                   actions (dispatcher, open) ──▶ exec ──▶ OS
//!
//!   SIGINT/SIGTERM/SIGHUP ──▶ lifecycle (coordinator, bounded shutdown)
//!
//!   cross-cutting: config, observability (JSON log to file + stdout)
//! ```

// Core subsystems
pub mod actions;
pub mod exec;
pub mod http;
pub mod net;

// Cross-cutting concerns
pub mod cli;
pub mod config;
pub mod lifecycle;
pub mod observability;

/// Name used for the binary, the log file and notifications.
pub const APP_NAME: &str = "airdrop";

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::{Coordinator, Outcome, Shutdown};
