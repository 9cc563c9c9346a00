//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (net)
//!     → server.rs (Axum router, middleware, accept loop)
//!     → handlers.rs (method check, JSON decode, dispatch)
//!     → request.rs (client IP, user agent)
//!     → response.rs (plain-text errors, JSON outcome)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;
pub mod types;

pub use server::{build_router, AppState, HttpServer, ServerError, WEBHOOK_PATH};
pub use types::{InboundMessage, OutboundResponse};
