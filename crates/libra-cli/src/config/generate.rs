//! OpenAPI emission configuration.

use std::path::PathBuf;

use anyhow::{Result as AnyhowResult, anyhow};
use clap::Args;
use libra_contract::openapi::DEFAULT_OUTPUT_PATHS;
use serde::{Deserialize, Serialize};

use super::DocumentConfig;
use crate::TRACING_TARGET_CONFIG;

/// Configuration of the `generate` subcommand.
///
/// # Environment Variables
///
/// - `OPENAPI_OUTPUT` - Comma-separated output paths
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct GenerateConfig {
    /// Files the document is written to.
    ///
    /// Parent directories are not created.
    #[arg(
        short = 'o',
        long,
        env = "OPENAPI_OUTPUT",
        value_delimiter = ',',
        default_values = DEFAULT_OUTPUT_PATHS
    )]
    pub output: Vec<PathBuf>,

    /// Document-level settings.
    #[clap(flatten)]
    pub document: DocumentConfig,
}

impl GenerateConfig {
    /// Validates the output paths and document settings.
    pub fn validate(&self) -> AnyhowResult<()> {
        if self.output.is_empty() {
            return Err(anyhow!("At least one output path is required."));
        }

        if self.output.iter().any(|path| path.as_os_str().is_empty()) {
            return Err(anyhow!("Output paths must not be empty."));
        }

        self.document.validate()
    }

    /// Logs the configuration.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            output = ?self.output,
            server_url = %self.document.server_url,
            "Generate configuration"
        );
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output: DEFAULT_OUTPUT_PATHS.iter().map(PathBuf::from).collect(),
            document: DocumentConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(GenerateConfig::default().validate().is_ok());
    }

    #[test]
    fn requires_an_output() {
        let config = GenerateConfig {
            output: Vec::new(),
            ..GenerateConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GenerateConfig {
            output: vec![PathBuf::new()],
            ..GenerateConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
