//! Front-matter parsing
//!
//! Metadata is a block of `key: value` lines at the top of a post, fenced by
//! `---` lines or opened by `«««` and closed by `»»»`. Values are taken as the
//! raw rest of the line, so `title: Rust: the good parts` or
//! `title: Weekly notes #12` keep every character after the first colon.

use std::collections::HashMap;

/// Opening and closing delimiters of a front-matter block
const DELIMITERS: [(&str, &str); 2] = [("---", "---"), ("«««", "»»»")];

/// Front-matter metadata of a post
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    /// Publication date as written, expected `DD/MM/YYYY`
    pub date: Option<String>,

    /// Additional custom fields
    pub extra: HashMap<String, String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Once a delimited block with at least one `key: value` line is found it
    /// is always removed from the content; lines that are not `key: value`
    /// are skipped. Content without such a block is returned as is.
    pub fn parse(content: &str) -> (Self, &str) {
        // Editors on Windows like to start files with a byte order mark
        let trimmed = content.trim_start_matches('\u{feff}').trim_start();

        for (open, close) in DELIMITERS {
            if let Some(rest) = trimmed.strip_prefix(open) {
                // The opening delimiter must stand on its own line
                let Some(rest) = strip_line_end(rest) else {
                    continue;
                };
                return Self::parse_block(rest, close).unwrap_or((Self::default(), content));
            }
        }

        (Self::default(), content)
    }

    fn parse_block<'a>(rest: &'a str, close: &str) -> Option<(Self, &'a str)> {
        let (block, remaining) = split_at_closing_line(rest, close)?;

        if block.trim().is_empty() {
            return Some((Self::default(), remaining));
        }

        let mut fm = Self::default();
        let mut found = false;
        for line in block.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match split_key_value(trimmed) {
                Some((key, value)) => {
                    found = true;
                    fm.set(key, value);
                }
                None => tracing::warn!("Ignoring front-matter line {:?}", trimmed),
            }
        }

        // A leading `---` may just be a horizontal rule
        found.then_some((fm, remaining))
    }

    fn set(&mut self, key: &str, value: &str) {
        let value = unquote(value).to_string();
        match key {
            "title" => self.title = Some(value),
            "date" => self.date = Some(value),
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }
}

/// Split a `key: value` line at its first colon
///
/// The key must be a plain identifier (letters, digits, `_`, `-`) and the
/// colon must be followed by whitespace or the end of the line, so URLs and
/// prose are not taken for metadata.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let colon_pos = line.find(':')?;
    let key = &line[..colon_pos];
    let is_valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !matches!(key, "http" | "https" | "ftp");
    let after_colon = &line[colon_pos + 1..];
    if !is_valid_key || !(after_colon.is_empty() || after_colon.starts_with([' ', '\t'])) {
        return None;
    }
    Some((key, after_colon.trim()))
}

/// Drop one pair of matching surrounding quotes
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Consume trailing spaces and one line break; `None` if other text follows
fn strip_line_end(s: &str) -> Option<&str> {
    let s = s.trim_start_matches([' ', '\t']);
    if let Some(rest) = s.strip_prefix("\r\n") {
        Some(rest)
    } else if let Some(rest) = s.strip_prefix('\n') {
        Some(rest)
    } else {
        None
    }
}

/// Split `rest` at the first line consisting only of `close`
fn split_at_closing_line<'a>(rest: &'a str, close: &str) -> Option<(&'a str, &'a str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == close {
            let body = &rest[..offset];
            let remaining = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Some((body, remaining));
        }
        offset += line.len();
    }
    None
}
