//! Content module - handles posts and their front-matter

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use markdown::{Converted, MarkdownRenderer};
pub use post::{slug_for, sort_newest_first, Post, PostSummary};
