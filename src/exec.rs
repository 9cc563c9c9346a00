//! Command execution.
//!
//! # Responsibilities
//! - Run an OS program from an ordered argument list (program + args)
//! - Wait for the child to exit; no output capture, no timeout
//! - Report spawn failures and non-zero exits as typed errors
//!
//! # Design Decisions
//! - No shell: arguments are passed as a list, never re-parsed
//! - The [`Executor`] trait is the only way actions touch the OS, so
//!   handlers can be driven by a recording stub in tests

use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::process::Command;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The argument list had no program name.
    #[error("empty command")]
    EmptyCommand,
    /// The program could not be started.
    #[error("spawning {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The program ran but exited unsuccessfully.
    #[error("running {program}: {status}")]
    Failed { program: String, status: ExitStatus },
}

/// Capability to run an external program to completion.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run `args[0]` with `args[1..]` and wait for it to finish.
    async fn execute(&self, args: &[String]) -> Result<(), ExecError>;
}

/// Executor backed by real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

#[async_trait]
impl Executor for SystemExecutor {
    async fn execute(&self, args: &[String]) -> Result<(), ExecError> {
        let (program, rest) = args.split_first().ok_or(ExecError::EmptyCommand)?;

        tracing::debug!(program = %program, args = ?rest, "Executing command");

        let status = Command::new(program)
            .args(rest)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|source| ExecError::Spawn {
                program: program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ExecError::Failed {
                program: program.clone(),
                status,
            })
        }
    }
}
