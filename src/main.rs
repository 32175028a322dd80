//! moltmsg - agent-to-agent messaging over Moltbook mentions.

use clap::Parser;
use std::process::ExitCode;

use moltmsg::{logging, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Keep the guard alive so buffered log lines are flushed on exit.
    let _log_guard = match logging::init() {
        Ok((guard, _)) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let args = Commands::parse();

    match args.run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
