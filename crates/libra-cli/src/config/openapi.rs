//! Documentation route configuration.

use anyhow::{Result as AnyhowResult, anyhow};
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Paths where the OpenAPI JSON document and the Scalar UI are served.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct OpenApiConfig {
    /// Path which exposes the OpenAPI JSON document.
    #[arg(long, env = "OPENAPI_JSON_PATH", default_value = "/api/openapi.json")]
    pub open_api_json: String,

    /// Path which exposes the Scalar API reference UI.
    #[arg(long, env = "OPENAPI_SCALAR_PATH", default_value = "/api/docs")]
    pub scalar_ui: String,
}

impl OpenApiConfig {
    /// Validates that both paths are absolute and distinct.
    pub fn validate(&self) -> AnyhowResult<()> {
        for path in [&self.open_api_json, &self.scalar_ui] {
            if !path.starts_with('/') {
                return Err(anyhow!("Route path {path:?} must start with '/'."));
            }
        }

        if self.open_api_json == self.scalar_ui {
            return Err(anyhow!(
                "The OpenAPI document and the Scalar UI cannot share the path {:?}.",
                self.scalar_ui
            ));
        }

        Ok(())
    }

    /// Logs the configuration.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            openapi_path = %self.open_api_json,
            scalar_path = %self.scalar_ui,
            "Documentation configuration"
        );
    }
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            open_api_json: "/api/openapi.json".to_owned(),
            scalar_ui: "/api/docs".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(OpenApiConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_relative_and_shared_paths() {
        let relative = OpenApiConfig {
            scalar_ui: "docs".to_owned(),
            ..OpenApiConfig::default()
        };
        assert!(relative.validate().is_err());

        let shared = OpenApiConfig {
            scalar_ui: "/api/openapi.json".to_owned(),
            ..OpenApiConfig::default()
        };
        assert!(shared.validate().is_err());
    }
}
