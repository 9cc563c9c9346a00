//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configuration (defaults, file, CLI) and validate it
//! - Open the log sink and install the subscriber
//! - Register signal handlers and bind the listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - The listener binds last (traffic only when ready)

use std::sync::Arc;
use std::time::Duration;

use crate::actions::Dispatcher;
use crate::cli::Cli;
use crate::config::{default_log_file, load_config, validate_config, AppConfig, ConfigError};
use crate::exec::Executor;
use crate::http::HttpServer;
use crate::lifecycle::signals::OsSignals;
use crate::lifecycle::Coordinator;
use crate::net::{Listener, ListenerError};
use crate::observability::logging::{env_filter, LogError, LogSink};
use crate::APP_NAME;

/// Fatal startup error.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Log(#[from] LogError),
    #[error("installing signal handlers: {0}")]
    Signals(#[source] std::io::Error),
    #[error(transparent)]
    Listener(#[from] ListenerError),
}

/// Defaults, overlaid by the config file, overlaid by flags; then validated.
pub fn resolve_config(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Bring every subsystem up, returning a coordinator ready to run.
pub async fn start(
    config: AppConfig,
    executor: Arc<dyn Executor>,
) -> Result<(Coordinator, OsSignals), StartupError> {
    let log_path = config
        .logging
        .file
        .clone()
        .unwrap_or_else(|| default_log_file(APP_NAME));
    let log = LogSink::open(&log_path)?;
    log.install(env_filter(config.logging.filter.as_deref())?)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_file = %log.path().display(),
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        shutdown_timeout_secs = config.timeouts.shutdown_secs,
        notifications = config.notifications.enabled,
        "Configuration loaded"
    );

    let signals = OsSignals::install().map_err(StartupError::Signals)?;
    let listener = Listener::bind(&config.listener).await?;

    let dispatcher =
        Dispatcher::new(executor, APP_NAME).with_notifications(config.notifications.enabled);
    let server = HttpServer::new(&config, dispatcher);

    let coordinator = Coordinator::new(server, listener, log)
        .with_shutdown_timeout(Duration::from_secs(config.timeouts.shutdown_secs));

    Ok((coordinator, signals))
}
