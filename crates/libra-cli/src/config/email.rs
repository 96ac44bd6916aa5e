//! Email rendering configuration.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result as AnyhowResult, anyhow};
use clap::{Args, ValueEnum};
use libra_email::EmailVerification;
use serde::{Deserialize, Serialize};

/// Which values the verification email is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailMode {
    /// Server-side placeholders such as `{{.Username}}`.
    #[default]
    Template,
    /// Sample values.
    Preview,
    /// Values given on the command line.
    Render,
}

impl EmailMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Preview => "preview",
            Self::Render => "render",
        }
    }
}

impl fmt::Display for EmailMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of the `email` subcommand.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct EmailConfig {
    /// Values to render the message with.
    #[arg(long, value_enum, default_value_t = EmailMode::Template)]
    pub mode: EmailMode,

    /// Recipient username, required in render mode.
    #[arg(long)]
    pub username: Option<String>,

    /// Verification code, required in render mode.
    #[arg(long)]
    pub code: Option<String>,

    /// Minutes until the code expires, used in render mode.
    #[arg(long, default_value_t = 30)]
    pub expires_in: u32,

    /// File to write the HTML to; printed to stdout when omitted.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

impl EmailConfig {
    /// Validates that render mode has every value it needs.
    pub fn validate(&self) -> AnyhowResult<()> {
        if self.expires_in == 0 {
            return Err(anyhow!("Expiry must be at least one minute."));
        }

        self.verification().map(drop)
    }

    /// Returns the message to render.
    pub fn verification(&self) -> AnyhowResult<EmailVerification> {
        match self.mode {
            EmailMode::Template => Ok(EmailVerification::template()),
            EmailMode::Preview => Ok(EmailVerification::preview()),
            EmailMode::Render => {
                let username = self
                    .username
                    .as_deref()
                    .context("--username is required in render mode")?;
                let code = self
                    .code
                    .as_deref()
                    .context("--code is required in render mode")?;
                Ok(EmailVerification::new(username, code, self.expires_in))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(mode: EmailMode) -> EmailConfig {
        EmailConfig {
            mode,
            username: None,
            code: None,
            expires_in: 30,
            output: None,
        }
    }

    #[test]
    fn template_and_preview_need_no_values() {
        let template = config(EmailMode::Template).verification().unwrap();
        assert_eq!(template, EmailVerification::template());

        let preview = config(EmailMode::Preview).verification().unwrap();
        assert_eq!(preview, EmailVerification::preview());
    }

    #[test]
    fn render_uses_given_values() {
        let config = EmailConfig {
            username: Some("Ada".into()),
            code: Some("482913".into()),
            expires_in: 15,
            ..config(EmailMode::Render)
        };

        let email = config.verification().unwrap();
        assert_eq!(email, EmailVerification::new("Ada", "482913", 15));
    }

    #[test]
    fn render_requires_values() {
        let error = config(EmailMode::Render).validate().unwrap_err();
        assert!(error.to_string().contains("--username"));
    }

    #[test]
    fn rejects_zero_expiry() {
        let config = EmailConfig {
            expires_in: 0,
            ..config(EmailMode::Preview)
        };
        assert!(config.validate().is_err());
    }
}
