//! Email address verification message.

use std::borrow::Cow;

use html_escape::encode_text;
use serde::{Deserialize, Serialize};

use crate::EmailTemplate;
use crate::layout::{
    COLOR_GRAY_100, COLOR_GRAY_600, COLOR_GRAY_700, COLOR_GRAY_800, EmailLayout, footnote_style,
    heading, section, text,
};

/// Tracing target for email rendering.
const TRACING_TARGET: &str = "libra_email::verification";

const TITLE: &str = "Verify your email";

/// Verification code message sent after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailVerification {
    pub username: String,
    pub verification_code: String,
    pub expires_in_minutes: String,
}

impl EmailVerification {
    /// Creates a message with concrete values.
    pub fn new(
        username: impl Into<String>,
        verification_code: impl Into<String>,
        expires_in_minutes: u32,
    ) -> Self {
        Self {
            username: username.into(),
            verification_code: verification_code.into(),
            expires_in_minutes: expires_in_minutes.to_string(),
        }
    }

    /// Returns the message with server-side template placeholders.
    pub fn template() -> Self {
        Self {
            username: "{{.Username}}".to_owned(),
            verification_code: "{{.VerificationCode}}".to_owned(),
            expires_in_minutes: "{{.ExpiresInMinutes}}".to_owned(),
        }
    }

    /// Returns the message with sample values.
    pub fn preview() -> Self {
        Self::new("John", "123456", 30)
    }

    fn body(&self) -> String {
        let greeting = format!("Hi {},", self.username);
        let expiry = format!("This code expires in {} minutes.", self.expires_in_minutes);

        let body_style =
            format!("color:{COLOR_GRAY_700};font-size:16px;line-height:24px;margin:16px 0");
        let heading_style = format!(
            "color:{COLOR_GRAY_800};font-size:24px;line-height:32px;font-weight:700;margin-top:16px"
        );
        let code_style = format!(
            "font-size:30px;line-height:36px;font-weight:700;letter-spacing:0.3em;\
             background-color:{COLOR_GRAY_100};display:inline-block;padding:12px 24px;\
             border-radius:6px;margin:16px 0"
        );
        let expiry_style =
            format!("color:{COLOR_GRAY_600};font-size:14px;line-height:20px;margin:16px 0");

        [
            heading(&heading_style, TITLE),
            section(
                "",
                &[
                    text(&body_style, &escape(&greeting)),
                    text(&body_style, "Use the code below to confirm your email address."),
                ]
                .concat(),
            ),
            section(
                "margin:32px 0;text-align:center",
                &text(&code_style, &escape(&self.verification_code)),
            ),
            text(&expiry_style, &escape(&expiry)),
            text(
                &footnote_style(),
                &escape("If you didn't request this, you can ignore this email."),
            ),
        ]
        .concat()
    }
}

impl EmailTemplate for EmailVerification {
    fn subject(&self) -> String {
        TITLE.to_owned()
    }

    fn render(&self) -> String {
        tracing::debug!(
            target: TRACING_TARGET,
            username = %self.username,
            "Rendering verification email"
        );

        EmailLayout::new(TITLE).render(&self.body())
    }
}

fn escape(value: &str) -> Cow<'_, str> {
    encode_text(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_concrete_values() {
        let html = EmailVerification::new("Ada", "482913", 15).render();

        assert!(html.contains("Verify your email</h1>"));
        assert!(html.contains("Hi Ada,"));
        assert!(html.contains("Use the code below to confirm your email address."));
        assert!(html.contains(">482913</p>"));
        assert!(html.contains("This code expires in 15 minutes."));
        assert!(html.contains("you can ignore this email."));
    }

    #[test]
    fn template_keeps_placeholders() {
        let html = EmailVerification::template().render();

        assert!(html.contains("Hi {{.Username}},"));
        assert!(html.contains(">{{.VerificationCode}}</p>"));
        assert!(html.contains("expires in {{.ExpiresInMinutes}} minutes."));
    }

    #[test]
    fn preview_values() {
        let email = EmailVerification::preview();
        assert_eq!(email.username, "John");
        assert_eq!(email.verification_code, "123456");
        assert_eq!(email.expires_in_minutes, "30");
        assert_eq!(email.subject(), "Verify your email");
    }

    #[test]
    fn values_are_escaped() {
        let html = EmailVerification::new("<script>", "1&2", 5).render();

        assert!(!html.contains("<script>"));
        assert!(html.contains("Hi &lt;script&gt;,"));
        assert!(html.contains("1&amp;2"));
    }
}
