//! Subcommand implementations.

use anyhow::Context;
use libra_contract::contracts::build_api_contract;
use libra_contract::openapi::{generate_document, render_document, write_document};
use libra_email::EmailTemplate;

use crate::TRACING_TARGET_COMMAND;
use crate::config::{DocumentConfig, EmailConfig, GenerateConfig, ServeConfig};
use crate::server;

/// Builds the aggregated contract and renders it as OpenAPI JSON.
fn render_api_document(config: &DocumentConfig) -> anyhow::Result<String> {
    let contract = build_api_contract().context("failed to build the API contract")?;
    let document = generate_document(&contract, &config.options())
        .context("failed to generate the OpenAPI document")?;

    tracing::info!(
        target: TRACING_TARGET_COMMAND,
        routes = contract.routes().len(),
        paths = document.paths.len(),
        schemas = document.components.schemas.len(),
        "OpenAPI document generated"
    );

    render_document(&document).context("failed to render the OpenAPI document")
}

/// Writes the OpenAPI document to every configured path.
pub async fn generate(config: &GenerateConfig) -> anyhow::Result<()> {
    let rendered = render_api_document(&config.document)?;

    write_document(&rendered, config.output.as_slice())
        .await
        .context("failed to write the OpenAPI document")
}

/// Serves the OpenAPI document and the Scalar UI.
pub async fn serve(config: &ServeConfig) -> anyhow::Result<()> {
    let rendered = render_api_document(&config.document)?;
    let router = server::docs_router(rendered, &config.openapi);

    server::serve(router, config.server.clone())
        .await
        .context("documentation server failed")
}

/// Renders the verification email to a file or stdout.
pub async fn email(config: &EmailConfig) -> anyhow::Result<()> {
    let email = config.verification()?;
    let html = email.render();

    match &config.output {
        Some(path) => {
            tokio::fs::write(path, &html)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;

            tracing::info!(
                target: TRACING_TARGET_COMMAND,
                path = %path.display(),
                subject = %email.subject(),
                "Email rendered"
            );
        }
        None => println!("{html}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::config::EmailMode;

    #[tokio::test]
    async fn generate_writes_every_output() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = GenerateConfig {
            output: vec![dir.path().join("openapi.json"), dir.path().join("copy.json")],
            document: DocumentConfig {
                server_url: "https://api.example.com".to_owned(),
            },
        };

        generate(&config).await?;

        for path in &config.output {
            let contents = tokio::fs::read_to_string(path).await?;
            let document: Value = serde_json::from_str(&contents)?;
            assert_eq!(document["openapi"], "3.0.2");
            assert_eq!(document["servers"][0]["url"], "https://api.example.com");
        }

        Ok(())
    }

    #[tokio::test]
    async fn generate_reports_failed_writes() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = GenerateConfig {
            output: vec![dir.path().join("missing").join("openapi.json")],
            document: DocumentConfig::default(),
        };

        assert!(generate(&config).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn email_writes_html() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("email.html");
        let config = EmailConfig {
            mode: EmailMode::Preview,
            username: None,
            code: None,
            expires_in: 30,
            output: Some(path.clone()),
        };

        email(&config).await?;

        let html = tokio::fs::read_to_string(&path).await?;
        assert!(html.contains("Hi John,"));
        assert!(html.contains("123456"));
        Ok(())
    }
}
