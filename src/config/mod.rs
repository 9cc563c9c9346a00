//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! AppConfig::default()
//!     → loader.rs (optional TOML file, parse & deserialize)
//!     → CLI overrides (addr, log file, notifications)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{default_log_file, load_config, ConfigError};
pub use schema::{AppConfig, ListenerConfig};
pub use validation::{validate_config, ValidationError};
