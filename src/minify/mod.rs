//! Minification of HTML and CSS outputs.
//!
//! HTML goes through `minify_html`, CSS through `lightningcss`. Both can be
//! switched off with `minify: false`, in which case content passes through
//! unchanged.

use anyhow::{anyhow, Result};
use lightningcss::{
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions, StyleSheet},
};
use std::borrow::Cow;

/// Content type for minification.
pub enum MinifyType<'a> {
    /// HTML content
    Html(&'a [u8]),
    /// CSS content
    Css(&'a str),
}

/// Minifier for site outputs
#[derive(Debug, Clone, Copy)]
pub struct Minifier {
    enabled: bool,
}

impl Minifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Minify content based on type.
    ///
    /// Returns `Cow::Borrowed` if minify disabled, `Cow::Owned` if minified.
    pub fn minify<'a>(&self, content: MinifyType<'a>) -> Result<Cow<'a, [u8]>> {
        if !self.enabled {
            return Ok(match content {
                MinifyType::Html(html) => Cow::Borrowed(html),
                MinifyType::Css(css) => Cow::Borrowed(css.as_bytes()),
            });
        }

        match content {
            MinifyType::Html(html) => Ok(Cow::Owned(minify_html_inner(html))),
            MinifyType::Css(css) => Ok(Cow::Owned(minify_css_inner(css)?.into_bytes())),
        }
    }
}

/// Minify HTML content using `minify_html` crate.
fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    minify_html::minify(html, &cfg)
}

/// Minify a stylesheet using `lightningcss`.
fn minify_css_inner(css: &str) -> Result<String> {
    let mut stylesheet = StyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| anyhow!("Failed to parse stylesheet: {}", e))?;
    stylesheet
        .minify(MinifyOptions::default())
        .map_err(|e| anyhow!("Failed to minify stylesheet: {}", e))?;
    let output = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| anyhow!("Failed to print stylesheet: {}", e))?;
    Ok(output.code)
}
