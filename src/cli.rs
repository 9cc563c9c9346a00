//! Command-line interface.

use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser};

use crate::config::{default_log_file, AppConfig};
use crate::APP_NAME;

#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
#[command(about = "Simple webhook server", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// HTTP service address [default: :5001]
    #[arg(short, long, value_name = "ADDR")]
    pub addr: Option<String>,

    /// Print version and exit
    #[arg(short = 'V', long)]
    pub version: bool,

    /// Log filepath
    #[arg(short, long, value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Config file (TOML)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable desktop notifications
    #[arg(long)]
    pub no_notify: bool,
}

impl Cli {
    /// Parse the process arguments; the help text lists the default log file.
    pub fn parse_args() -> Self {
        let command = Self::command().after_help(files_section());
        let matches = command.get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    /// Overlay the flags that were given onto `config`.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(addr) = &self.addr {
            config.listener.bind_address = addr.clone();
        }
        if let Some(log) = &self.log {
            config.logging.file = Some(log.clone());
        }
        if self.no_notify {
            config.notifications.enabled = false;
        }
    }
}

/// `<name> v<version> <os>/<arch>`
pub fn version() -> String {
    format!(
        "{} v{} {}/{}",
        APP_NAME,
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

fn files_section() -> String {
    format!("Files:\n  {}", default_log_file(APP_NAME).display())
}
