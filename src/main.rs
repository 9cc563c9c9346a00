use std::process::ExitCode;
use std::sync::Arc;

use airdrop::cli::{self, Cli};
use airdrop::exec::SystemExecutor;
use airdrop::lifecycle::startup;
use airdrop::APP_NAME;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if cli.version {
        println!("{}", cli::version());
        return ExitCode::SUCCESS;
    }

    let config = match startup::resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{APP_NAME}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (coordinator, signals) = match startup::start(config, Arc::new(SystemExecutor)).await {
        Ok(started) => started,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            eprintln!("{APP_NAME}: {e}");
            return ExitCode::FAILURE;
        }
    };

    coordinator.run(signals).await.exit_code()
}
