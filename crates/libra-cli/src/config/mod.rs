//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── generate: GenerateConfig   # Output paths, advertised server
//! ├── serve: ServeConfig
//! │   ├── server: ServerConfig   # Host, port, shutdown
//! │   ├── openapi: OpenApiConfig # JSON and Scalar UI paths
//! │   └── document: DocumentConfig
//! └── email: EmailConfig         # Render mode, values, output
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod document;
mod email;
mod generate;
mod openapi;
mod server;

use std::process;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use self::document::DocumentConfig;
pub use self::email::{EmailConfig, EmailMode};
pub use self::generate::GenerateConfig;
pub use self::openapi::OpenApiConfig;
pub use self::server::ServerConfig;
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "libra")]
#[command(about = "Tooling for the libra-link API contracts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand, Serialize, Deserialize)]
pub enum Command {
    /// Write the OpenAPI document to disk.
    Generate(GenerateConfig),
    /// Serve the API reference documentation.
    Serve(ServeConfig),
    /// Render the email verification message.
    Email(EmailConfig),
}

/// Configuration of the documentation server.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct ServeConfig {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// Documentation routes.
    #[clap(flatten)]
    pub openapi: OpenApiConfig,

    /// Document-level settings.
    #[clap(flatten)]
    pub document: DocumentConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    ///
    /// Logs go to stderr so rendered output on stdout stays clean.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    /// Validates the configuration of the selected subcommand.
    pub fn validate(&self) -> anyhow::Result<()> {
        match &self.command {
            Command::Generate(config) => config
                .validate()
                .context("invalid generate configuration"),
            Command::Serve(config) => {
                config
                    .server
                    .validate()
                    .context("invalid server configuration")?;
                config
                    .openapi
                    .validate()
                    .context("invalid documentation configuration")?;
                config
                    .document
                    .validate()
                    .context("invalid document configuration")
            }
            Command::Email(config) => config.validate().context("invalid email configuration"),
        }
    }

    /// Logs the configuration of the selected subcommand.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        match &self.command {
            Command::Generate(config) => config.log(),
            Command::Serve(config) => {
                config.server.log();
                config.openapi.log();
                config.document.log();
            }
            Command::Email(config) => {
                tracing::info!(
                    target: TRACING_TARGET_CONFIG,
                    mode = %config.mode,
                    output = ?config.output,
                    "Email configuration"
                );
            }
        }
    }

    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
