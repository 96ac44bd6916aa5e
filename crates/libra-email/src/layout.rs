//! Shared email shell.

use html_escape::encode_text;
use jiff::Zoned;

pub(crate) const COLOR_GRAY_100: &str = "#f3f4f6";
pub(crate) const COLOR_GRAY_500: &str = "#6b7280";
pub(crate) const COLOR_GRAY_600: &str = "#4b5563";
pub(crate) const COLOR_GRAY_700: &str = "#374151";
pub(crate) const COLOR_GRAY_800: &str = "#1f2937";

const FONT_SANS: &str = "ui-sans-serif, system-ui, -apple-system, BlinkMacSystemFont, \
    'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif";

const POSTAL_ADDRESS: &str = "123 Project Street, Suite 100, San Francisco, CA 94103";

/// Page shell shared by every email.
///
/// Wraps the body in a gray page with a centered white card, at most 600px
/// wide. The preview text is rendered as a hidden block that mail clients
/// show next to the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailLayout {
    preview: String,
    footer: Option<String>,
}

impl EmailLayout {
    /// Creates a layout with the default footer.
    pub fn new(preview: impl Into<String>) -> Self {
        Self {
            preview: preview.into(),
            footer: None,
        }
    }

    /// Replaces the default footer with raw HTML.
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Returns the preview text.
    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// Renders the full document around `body`, which must already be HTML.
    pub fn render(&self, body: &str) -> String {
        let footer = match &self.footer {
            Some(footer) => footer.clone(),
            None => default_footer(Zoned::now().year()),
        };

        format!(
            concat!(
                "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" ",
                "\"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">",
                "<html dir=\"ltr\" lang=\"en\">",
                "<head>",
                "<meta content=\"text/html; charset=UTF-8\" http-equiv=\"Content-Type\"/>",
                "<meta name=\"x-apple-disable-message-reformatting\"/>",
                "</head>",
                "<div style=\"display:none;overflow:hidden;line-height:1px;",
                "opacity:0;max-height:0;max-width:0\">{preview}</div>",
                "<body style=\"background-color:{background};font-family:{font}\">",
                "<table align=\"center\" width=\"100%\" border=\"0\" cellpadding=\"0\" ",
                "cellspacing=\"0\" role=\"presentation\" style=\"max-width:600px;",
                "background-color:#ffffff;padding:32px;border-radius:8px;",
                "box-shadow:0 1px 2px 0 rgb(0,0,0,0.05);margin:40px auto\">",
                "<tbody><tr style=\"width:100%\"><td>{body}{footer}</td></tr></tbody>",
                "</table>",
                "</body>",
                "</html>",
            ),
            preview = encode_text(&self.preview),
            background = COLOR_GRAY_100,
            font = FONT_SANS,
            body = body,
            footer = footer,
        )
    }
}

/// Footer with the copyright line for `year` and the postal address.
pub fn default_footer(year: i16) -> String {
    let copyright = format!("Copyright {year} libra-link. All rights reserved.");
    section(
        "margin-top:32px;text-align:center",
        &[
            text(&footnote_style(), &encode_text(&copyright)),
            text(&footnote_style(), POSTAL_ADDRESS),
        ]
        .concat(),
    )
}

/// Small gray text, used for footnotes.
pub(crate) fn footnote_style() -> String {
    format!("color:{COLOR_GRAY_500};font-size:12px;line-height:16px;margin:16px 0")
}

pub(crate) fn section(style: &str, content: &str) -> String {
    format!(
        "<table align=\"center\" width=\"100%\" border=\"0\" cellpadding=\"0\" \
         cellspacing=\"0\" role=\"presentation\" style=\"{style}\">\
         <tbody><tr><td>{content}</td></tr></tbody></table>"
    )
}

pub(crate) fn text(style: &str, content: &str) -> String {
    format!("<p style=\"{style}\">{content}</p>")
}

pub(crate) fn heading(style: &str, content: &str) -> String {
    format!("<h1 style=\"{style}\">{content}</h1>")
}
