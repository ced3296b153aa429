//! Allow-list sanitizer for HTML rendered from untrusted markdown.
//!
//! Tags, attributes, class names and URL schemes that are not explicitly allowed are removed.
//! A tag that is not allowed is removed together with everything inside it.

#![warn(clippy::all)]
#[macro_use]
extern crate html5ever;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate maplit;

pub mod attributes;
pub mod config;
pub mod error;
pub mod handler;
pub mod sanitizer;
pub mod scheme;
pub mod tokenizer;

pub use config::default::DEFAULT_CONFIG;
pub use config::options::SanitizerOptions;
pub use config::{Filter, FilterToken, SanitizerConfig};
pub use error::{Error, Result};
pub use sanitizer::Sanitizer;

/// Sanitizes `html` with an already resolved configuration.
pub fn sanitize(html: &str, config: &SanitizerConfig) -> String {
    Sanitizer::new(config).sanitize_str(html)
}

/// Sanitizes `html` with `options` merged over [`DEFAULT_CONFIG`], or with `options` alone when
/// `strict` is set.
pub fn sanitize_markdown(html: &str, options: SanitizerOptions, strict: bool) -> String {
    sanitize(html, &options.resolve(strict))
}
