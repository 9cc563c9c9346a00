//! Action dispatch.
//!
//! # Data Flow
//! ```text
//! InboundMessage.action
//!     → Action::parse ("open" | anything else)
//!     → open.rs (platform command via Executor, best-effort notification)
//!     → OutboundResponse { success, message }
//! ```
//!
//! # Design Decisions
//! - Action failures are answered in-band (`success: false`), never as errors
//! - Unknown actions are a semantic failure, not a transport one

pub mod open;
pub mod platform;

use std::sync::Arc;

use crate::exec::Executor;
use crate::http::types::{InboundMessage, OutboundResponse};

pub use platform::Platform;

/// A parsed action name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open the content with the platform's default handler.
    Open,
    /// Anything not recognised; carries the raw value.
    Unknown(String),
}

impl Action {
    pub fn parse(name: &str) -> Self {
        match name {
            "open" => Action::Open,
            other => Action::Unknown(other.to_string()),
        }
    }
}

/// Routes decoded messages to their handler.
#[derive(Clone)]
pub struct Dispatcher {
    executor: Arc<dyn Executor>,
    platform: Platform,
    app_name: String,
    notify: bool,
}

impl Dispatcher {
    pub fn new(executor: Arc<dyn Executor>, app_name: impl Into<String>) -> Self {
        Self {
            executor,
            platform: Platform::current(),
            app_name: app_name.into(),
            notify: true,
        }
    }

    /// Override the detected platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Enable or disable the desktop notification after a successful open.
    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notify = enabled;
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Run the action named in `msg` and describe the outcome.
    pub async fn dispatch(&self, msg: &InboundMessage) -> OutboundResponse {
        match Action::parse(&msg.action) {
            Action::Open => open::handle(self, &msg.content).await,
            Action::Unknown(name) => OutboundResponse::failed(format!("Unknown action: {name}")),
        }
    }
}
