//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve config → Open log sink → Register signals → Bind listener
//!
//! Run (coordinator.rs):
//!     Spawn accept loop ─┬─ server fails first → CRASHED
//!                        └─ signal first → shutdown.rs
//!     → close log sink (exactly once) → Outcome
//!
//! Shutdown (shutdown.rs):
//!     Stop accepting → Drain connections → Abort at deadline
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then logging, then listeners
//! - Ordered shutdown: stop accept, drain, close
//! - Shutdown has timeout: forced close after deadline, still a clean exit
//! - Extra signals during shutdown are ignored

pub mod coordinator;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use coordinator::{Coordinator, Outcome};
pub use shutdown::{Shutdown, StopSignal};
pub use signals::{OsSignals, Signal, SignalSource};
