//! Recursive file listing

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::SourceError;

/// List every file below `root`, descending into all subdirectories
///
/// Directories themselves are never returned. The order is the order the
/// directory listing yields; callers that need an order sort themselves.
pub fn list_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, SourceError> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(SourceError::MissingRoot(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(SourceError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|source| SourceError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// First path whose text contains `pattern`
pub fn find_first<'a>(files: &'a [PathBuf], pattern: &str) -> Option<&'a Path> {
    files
        .iter()
        .find(|path| path.to_string_lossy().contains(pattern))
        .map(PathBuf::as_path)
}

/// Every path whose text contains `pattern`, in listing order
pub fn find_all<'a>(files: &'a [PathBuf], pattern: &str) -> Vec<&'a Path> {
    files
        .iter()
        .filter(|path| path.to_string_lossy().contains(pattern))
        .map(PathBuf::as_path)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_list_files_recurses() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("posts/2023")).unwrap();
        fs::write(dir.path().join("style.css"), "").unwrap();
        fs::write(dir.path().join("posts/a.md"), "").unwrap();
        fs::write(dir.path().join("posts/2023/b.md"), "").unwrap();

        let mut files = list_files(dir.path()).unwrap();
        files.sort();

        assert_eq!(
            files,
            vec![
                dir.path().join("posts/2023/b.md"),
                dir.path().join("posts/a.md"),
                dir.path().join("style.css"),
            ]
        );
    }

    #[test]
    fn test_list_files_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        assert!(list_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_list_files_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_files(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, SourceError::MissingRoot(_)));
    }

    #[test]
    fn test_list_files_root_is_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "").unwrap();
        let err = list_files(&file).unwrap_err();
        assert!(matches!(err, SourceError::NotADirectory(_)));
    }

    #[test]
    fn test_find_first_and_all() {
        let files = vec![
            PathBuf::from("src/templates/post-main.hbs"),
            PathBuf::from("src/templates/post-list.hbs"),
            PathBuf::from("src/about.html"),
            PathBuf::from("src/contact.html"),
        ];

        assert_eq!(
            find_first(&files, "-main.hbs"),
            Some(Path::new("src/templates/post-main.hbs"))
        );
        assert_eq!(find_first(&files, "index.hbs"), None);
        assert_eq!(find_all(&files, ".html").len(), 2);
    }

    #[test]
    fn test_find_first_is_substring_match() {
        let files = vec![
            PathBuf::from("src/archive-listing.hbs"),
            PathBuf::from("src/post-list.hbs"),
        ];
        assert_eq!(
            find_first(&files, "-list"),
            Some(Path::new("src/archive-listing.hbs"))
        );
    }
}
