//! Markdown rendering

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream};
use std::collections::HashMap;

use super::FrontMatter;

/// Characters dropped from GitHub-style heading ids
const ID_STRIP_CHARS: &str = "&+$,/:;=?@\"#{}|^¨~[]`\\*)(%.!'<>";

/// Result of converting one post source
#[derive(Debug, Clone)]
pub struct Converted {
    /// Rendered HTML body
    pub html: String,
    /// Front-matter metadata
    pub metadata: FrontMatter,
}

/// Markdown renderer
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        // Front-matter is stripped by FrontMatter::parse, not by the parser
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES;
        Self { options }
    }

    /// Split off the front-matter and render the rest
    pub fn convert(&self, source: &str) -> Converted {
        let (metadata, body) = FrontMatter::parse(source);
        Converted {
            html: self.render(body),
            metadata,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let mut events: Vec<Event> =
            TextMergeStream::new(Parser::new_ext(markdown, self.options)).collect();
        replace_emoji_shortcodes(&mut events);
        assign_heading_ids(&mut events);

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Swap `:shortcode:` text for the emoji it names, outside code blocks
fn replace_emoji_shortcodes(events: &mut [Event<'_>]) {
    let mut in_code_block = false;
    for event in events.iter_mut() {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text) if !in_code_block && text.contains(':') => {
                if let Some(replaced) = emojify(text) {
                    *text = CowStr::from(replaced);
                }
            }
            _ => {}
        }
    }
}

/// `None` when no known shortcode occurs in `text`
fn emojify(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut changed = false;

    while let Some(start) = rest.find(':') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let emoji = after.find(':').and_then(|end| {
            let name = &after[..end];
            let valid = !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-'));
            valid
                .then(|| emojis::get_by_shortcode(name))
                .flatten()
                .map(|e| (e.as_str(), end))
        });

        match emoji {
            Some((emoji, end)) => {
                out.push_str(emoji);
                rest = &after[end + 1..];
                changed = true;
            }
            None => {
                out.push(':');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    changed.then_some(out)
}

/// Give every heading without an explicit `{#id}` a GitHub-style id
fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut seen: HashMap<String, usize> = HashMap::new();

    for i in 0..events.len() {
        if !matches!(&events[i], Event::Start(Tag::Heading { id: None, .. })) {
            continue;
        }

        let base = github_id(&heading_text(&events[i + 1..]));
        if base.is_empty() {
            continue;
        }

        let count = seen.entry(base.clone()).or_insert(0);
        let id = if *count == 0 {
            base
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;

        if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[i] {
            *slot = Some(CowStr::from(id));
        }
    }
}

/// Plain text of a heading, up to its end tag
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

/// Heading id the way GitHub derives it: spaces to dashes, punctuation dropped
fn github_id(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !ID_STRIP_CHARS.contains(*c))
        .map(|c| if c == ' ' { '-' } else { c })
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Hello *World*\n\nThis is a test.");
        assert!(html.contains("<p>Hello <em>World</em></p>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_heading_ids() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello, World!\n\n## What's `new`?");
        assert!(html.contains(r#"<h1 id="hello-world">Hello, World!</h1>"#));
        assert!(html.contains(r#"<h2 id="whats-new">"#));
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Notes\n\n## Notes\n\n## Notes");
        assert!(html.contains(r#"id="notes""#));
        assert!(html.contains(r#"id="notes-1""#));
        assert!(html.contains(r#"id="notes-2""#));
    }

    #[test]
    fn test_explicit_heading_id_kept() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Intro {#start}");
        assert!(html.contains(r#"<h1 id="start">Intro</h1>"#));
    }

    #[test]
    fn test_heading_requires_space() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("#hashtag");
        assert!(!html.contains("<h1"));
    }

    #[test]
    fn test_tables_and_strikethrough() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_convert_extracts_metadata() {
        let renderer = MarkdownRenderer::new();
        let converted = renderer.convert("---\ntitle: First\ndate: 01/01/2023\n---\n\nHi there.");
        assert_eq!(converted.metadata.title.as_deref(), Some("First"));
        assert_eq!(converted.metadata.date.as_deref(), Some("01/01/2023"));
        assert_eq!(converted.html.trim(), "<p>Hi there.</p>");
    }

    #[test]
    fn test_convert_never_renders_metadata() {
        let renderer = MarkdownRenderer::new();
        let converted = renderer.convert(
            "\u{feff}---\ntitle: Rust: the good parts\ndate: 01/01/2023\n---\n\nBody text.",
        );
        assert_eq!(converted.metadata.title.as_deref(), Some("Rust: the good parts"));
        assert!(!converted.html.contains("title:"));
        assert!(!converted.html.contains("01/01/2023"));
        assert_eq!(converted.html.trim(), "<p>Body text.</p>");
    }

    #[test]
    fn test_emoji_shortcodes() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Shipped :tada: at 12:30:45, see :not_an_emoji:");
        assert!(html.contains("Shipped 🎉 at 12:30:45"));
        assert!(html.contains(":not_an_emoji:"));
    }

    #[test]
    fn test_emoji_shortcodes_left_in_code() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Inline `:tada:` here\n\n```\nparty = :tada:\n```\n");
        assert!(html.contains("<code>:tada:</code>"));
        assert!(html.contains("party = :tada:"));
        assert!(!html.contains('🎉'));
    }

    #[test]
    fn test_github_id() {
        assert_eq!(github_id("Hello World"), "hello-world");
        assert_eq!(github_id("C++ & Rust (2023)"), "c--rust-2023");
    }
}
