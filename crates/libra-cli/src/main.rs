#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod server;

use std::process;

use crate::config::{Cli, Command};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "libra_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "libra_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "libra_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "libra_cli::commands";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::debug!(
            target: TRACING_TARGET_SHUTDOWN,
            "libra terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = format!("{error:#}"),
            "libra terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate()?;

    match &cli.command {
        Command::Generate(config) => commands::generate(config).await,
        Command::Serve(config) => commands::serve(config).await,
        Command::Email(config) => commands::email(config).await,
    }
}
