//! Named source slots resolved once per build

use std::fmt;
use std::path::{Path, PathBuf};

use super::{find_all, SourceError};

/// A file the build cannot run without
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Outer template wrapping every rendered page
    Layout,
    /// Section template for a single post
    PostSection,
    /// Section template for the post listing
    ListSection,
    /// The site stylesheet
    Stylesheet,
}

impl Slot {
    /// File name suffix identifying the slot
    pub fn pattern(self) -> &'static str {
        match self {
            Slot::Layout => "index.hbs",
            Slot::PostSection => "-main.hbs",
            Slot::ListSection => "-list.hbs",
            Slot::Stylesheet => ".css",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::Layout => "layout template",
            Slot::PostSection => "post-section template",
            Slot::ListSection => "list-section template",
            Slot::Stylesheet => "stylesheet",
        };
        f.write_str(name)
    }
}

/// Classified view of the source tree
#[derive(Debug, Clone)]
pub struct SourceManifest {
    pub layout: PathBuf,
    pub post_section: PathBuf,
    pub list_section: PathBuf,
    pub stylesheet: PathBuf,
    /// Further `.css` files; only `stylesheet` is built
    pub extra_stylesheets: Vec<PathBuf>,
    /// Markdown sources under the posts directory, in discovery order
    pub posts: Vec<PathBuf>,
    /// Static `.html` pages anywhere in the tree, in discovery order
    pub pages: Vec<PathBuf>,
}

impl SourceManifest {
    /// Classify the walked source files
    ///
    /// `posts_dir` is the absolute directory holding the posts.
    pub fn resolve(files: &[PathBuf], posts_dir: &Path) -> Result<Self, SourceError> {
        let layout = resolve_template(files, Slot::Layout)?;
        let post_section = resolve_template(files, Slot::PostSection)?;
        let list_section = resolve_template(files, Slot::ListSection)?;

        let mut stylesheets = files
            .iter()
            .filter(|path| has_extension(path, &["css"]))
            .cloned();
        let stylesheet = stylesheets.next().ok_or(SourceError::MissingSlot {
            slot: Slot::Stylesheet,
            pattern: Slot::Stylesheet.pattern(),
        })?;
        let extra_stylesheets: Vec<_> = stylesheets.collect();

        let mut posts = Vec::new();
        for path in files.iter().filter(|path| path.starts_with(posts_dir)) {
            if has_extension(path, &["md", "markdown"]) {
                posts.push(path.clone());
            } else {
                tracing::debug!("Skipping non-markdown file in posts: {:?}", path);
            }
        }

        // A post's output would overwrite a page sharing its slug
        let mut pages = Vec::new();
        for path in files.iter().filter(|path| has_extension(path, &["html"])) {
            if posts.iter().any(|post| post.with_extension("html") == *path) {
                tracing::warn!("Skipping page {:?}, a post builds to the same path", path);
            } else {
                pages.push(path.clone());
            }
        }

        Ok(Self {
            layout,
            post_section,
            list_section,
            stylesheet,
            extra_stylesheets,
            posts,
            pages,
        })
    }
}

/// Find the single template whose file name ends with the slot's suffix
fn resolve_template(files: &[PathBuf], slot: Slot) -> Result<PathBuf, SourceError> {
    let pattern = slot.pattern();
    let mut candidates: Vec<PathBuf> = find_all(files, pattern)
        .into_iter()
        .filter(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().ends_with(pattern))
                .unwrap_or(false)
        })
        .map(Path::to_path_buf)
        .collect();

    match candidates.len() {
        0 => Err(SourceError::MissingSlot { slot, pattern }),
        1 => Ok(candidates.remove(0)),
        _ => Err(SourceError::AmbiguousSlot { slot, candidates }),
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.contains(&e))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(paths: &[&str]) -> Vec<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_resolve_full_tree() {
        let files = files(&[
            "/site/src/style/main.css",
            "/site/src/templates/index.hbs",
            "/site/src/templates/post-main.hbs",
            "/site/src/templates/post-list.hbs",
            "/site/src/posts/first.md",
            "/site/src/posts/notes.txt",
            "/site/src/about.html",
        ]);

        let manifest = SourceManifest::resolve(&files, Path::new("/site/src/posts")).unwrap();
        assert_eq!(manifest.layout, PathBuf::from("/site/src/templates/index.hbs"));
        assert_eq!(
            manifest.post_section,
            PathBuf::from("/site/src/templates/post-main.hbs")
        );
        assert_eq!(
            manifest.list_section,
            PathBuf::from("/site/src/templates/post-list.hbs")
        );
        assert_eq!(manifest.stylesheet, PathBuf::from("/site/src/style/main.css"));
        assert!(manifest.extra_stylesheets.is_empty());
        assert_eq!(manifest.posts, vec![PathBuf::from("/site/src/posts/first.md")]);
        assert_eq!(manifest.pages, vec![PathBuf::from("/site/src/about.html")]);
    }

    #[test]
    fn test_missing_layout_names_slot() {
        let files = files(&[
            "/site/src/main.css",
            "/site/src/post-main.hbs",
            "/site/src/post-list.hbs",
        ]);

        let err = SourceManifest::resolve(&files, Path::new("/site/src/posts")).unwrap_err();
        assert!(matches!(
            err,
            SourceError::MissingSlot {
                slot: Slot::Layout,
                ..
            }
        ));
        assert!(err.to_string().contains("layout template"));
    }

    #[test]
    fn test_missing_stylesheet() {
        let files = files(&[
            "/site/src/index.hbs",
            "/site/src/post-main.hbs",
            "/site/src/post-list.hbs",
        ]);

        let err = SourceManifest::resolve(&files, Path::new("/site/src/posts")).unwrap_err();
        assert!(matches!(
            err,
            SourceError::MissingSlot {
                slot: Slot::Stylesheet,
                ..
            }
        ));
    }

    #[test]
    fn test_listing_template_does_not_fill_list_slot() {
        let files = files(&[
            "/site/src/main.css",
            "/site/src/index.hbs",
            "/site/src/post-main.hbs",
            "/site/src/archive-listing.hbs",
        ]);

        let err = SourceManifest::resolve(&files, Path::new("/site/src/posts")).unwrap_err();
        assert!(matches!(
            err,
            SourceError::MissingSlot {
                slot: Slot::ListSection,
                ..
            }
        ));
    }

    #[test]
    fn test_ambiguous_section_template() {
        let files = files(&[
            "/site/src/main.css",
            "/site/src/index.hbs",
            "/site/src/post-main.hbs",
            "/site/src/page-main.hbs",
            "/site/src/post-list.hbs",
        ]);

        let err = SourceManifest::resolve(&files, Path::new("/site/src/posts")).unwrap_err();
        match err {
            SourceError::AmbiguousSlot { slot, candidates } => {
                assert_eq!(slot, Slot::PostSection);
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extra_stylesheets_kept_aside() {
        let files = files(&[
            "/site/src/a.css",
            "/site/src/b.css",
            "/site/src/index.hbs",
            "/site/src/post-main.hbs",
            "/site/src/post-list.hbs",
        ]);

        let manifest = SourceManifest::resolve(&files, Path::new("/site/src/posts")).unwrap();
        assert_eq!(manifest.stylesheet, PathBuf::from("/site/src/a.css"));
        assert_eq!(manifest.extra_stylesheets, vec![PathBuf::from("/site/src/b.css")]);
    }

    #[test]
    fn test_page_shadowed_by_post_skipped() {
        let files = files(&[
            "/site/src/main.css",
            "/site/src/index.hbs",
            "/site/src/post-main.hbs",
            "/site/src/post-list.hbs",
            "/site/src/posts/x.md",
            "/site/src/posts/x.html",
            "/site/src/posts/y.html",
        ]);

        let manifest = SourceManifest::resolve(&files, Path::new("/site/src/posts")).unwrap();
        assert_eq!(manifest.posts, vec![PathBuf::from("/site/src/posts/x.md")]);
        assert_eq!(manifest.pages, vec![PathBuf::from("/site/src/posts/y.html")]);
    }
}
