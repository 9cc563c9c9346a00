//! Structured logging.
//!
//! # Responsibilities
//! - Open the append-only log file
//! - Build the JSON subscriber writing every record to file and stdout
//! - Flush stdout and sync the file exactly once at exit
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Each record is formatted into one buffer and written with one call per
//!   target, so concurrent records never interleave within a line
//! - Log level configurable via config and `RUST_LOG` (env wins)

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::Subscriber;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "airdrop=info,tower_http=info";

/// Error type for log sink setup.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("opening log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("installing subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// The process log sink: an append-mode file mirrored to stdout.
///
/// Constructed once in `main` and handed to the lifecycle coordinator, which
/// consumes it with [`LogSink::close`].
#[derive(Debug)]
pub struct LogSink {
    file: Arc<File>,
    path: PathBuf,
}

impl LogSink {
    /// Open (or create) the log file in append mode.
    pub fn open(path: &Path) -> Result<Self, LogError> {
        let err = |source: io::Error| LogError::Open {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(err)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(err)?;

        Ok(Self {
            file: Arc::new(file),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// JSON subscriber writing to this sink.
    pub fn subscriber(&self, filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
        let writer = io::stdout.and(Arc::clone(&self.file));

        tracing_subscriber::registry().with(filter).with(
            tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_span_list(false)
                .with_writer(writer),
        )
    }

    /// Install this sink as the process-wide subscriber.
    pub fn install(&self, filter: EnvFilter) -> Result<(), LogError> {
        self.subscriber(filter).try_init()?;
        Ok(())
    }

    /// Flush stdout and sync the file. Consumes the sink.
    ///
    /// The file descriptor is not closed here: every subscriber built by
    /// [`LogSink::subscriber`] holds its own handle, and the installed one
    /// keeps appending records (such as the final exit message) until the
    /// process exits.
    pub fn close(self) -> io::Result<()> {
        io::stdout().flush()?;
        self.file.sync_all()
    }
}

/// `RUST_LOG` if set, else the configured directives, else [`DEFAULT_FILTER`].
pub fn env_filter(configured: Option<&str>) -> Result<EnvFilter, LogError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    Ok(EnvFilter::try_new(configured.unwrap_or(DEFAULT_FILTER))?)
}
