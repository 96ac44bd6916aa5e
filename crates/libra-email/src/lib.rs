#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod layout;
mod verification;

pub use crate::layout::{EmailLayout, default_footer};
pub use crate::verification::EmailVerification;

/// A renderable transactional email.
pub trait EmailTemplate {
    /// Subject line of the message.
    fn subject(&self) -> String;

    /// Complete HTML document of the message.
    fn render(&self) -> String;
}
