//! Document-level OpenAPI settings.

use anyhow::{Result as AnyhowResult, anyhow};
use clap::Args;
use libra_contract::openapi::DocumentOptions;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Settings applied to the generated document.
///
/// # Environment Variables
///
/// - `OPENAPI_SERVER_URL` - Server advertised in the document (default: http://localhost:8080)
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct DocumentConfig {
    /// Base URL of the server advertised in the document.
    #[arg(long, env = "OPENAPI_SERVER_URL", default_value = "http://localhost:8080")]
    pub server_url: String,
}

impl DocumentConfig {
    /// Validates that the server URL is an absolute HTTP(S) URL.
    pub fn validate(&self) -> AnyhowResult<()> {
        let url = self.server_url.as_str();
        let has_scheme = url.starts_with("http://") || url.starts_with("https://");
        if !has_scheme || url.ends_with("://") {
            return Err(anyhow!(
                "Server URL {url:?} is invalid. Expected an absolute http(s) URL."
            ));
        }

        Ok(())
    }

    /// Returns the document options for this configuration.
    pub fn options(&self) -> DocumentOptions {
        DocumentOptions::default().with_server_url(self.server_url.as_str())
    }

    /// Logs the configuration.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            server_url = %self.server_url,
            "Document configuration"
        );
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = DocumentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.options(), DocumentOptions::default());
    }

    #[test]
    fn rejects_relative_urls() {
        for url in ["localhost:8080", "/api", "https://", ""] {
            let config = DocumentConfig {
                server_url: url.to_owned(),
            };
            assert!(config.validate().is_err(), "{url} should be rejected");
        }
    }

    #[test]
    fn overrides_server() {
        let config = DocumentConfig {
            server_url: "https://api.example.com".to_owned(),
        };
        let options = config.options();
        assert_eq!(options.servers.len(), 1);
        assert_eq!(options.servers[0].url, "https://api.example.com");
    }
}
