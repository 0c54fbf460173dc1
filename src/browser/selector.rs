//! File selector - enumerate candidate files under a project root
//!
//! Hidden directories are pruned without being descended into. Hidden files
//! are skipped as well, so nothing under a dotted path is ever a candidate.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::extensions::ExtensionSet;

/// Returns true for names the host treats as hidden, UTF-8 or not
pub fn is_hidden_name(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

fn is_hidden(entry: &DirEntry) -> bool {
    // The root itself is never pruned, even if it lives in a dotted directory
    entry.depth() > 0 && is_hidden_name(entry.file_name())
}

/// Walk `root` and collect every non-hidden file whose extension is in `extensions`
///
/// The list is rebuilt on every call and reflects the file system as it is
/// right now. Order is depth-first traversal order. Unreadable entries and
/// symlink loops are skipped.
pub fn find_files(root: &Path, extensions: &ExtensionSet) -> Vec<PathBuf> {
    if extensions.is_empty() {
        return Vec::new();
    }

    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::trace!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_file() && extensions.matches(e.path()))
        .map(DirEntry::into_path)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "line\n").unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        let mut rel: Vec<String> = files
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        rel.sort();
        rel
    }

    #[test]
    fn test_is_hidden_name() {
        assert!(is_hidden_name(OsStr::new(".git")));
        assert!(is_hidden_name(OsStr::new(".env")));
        assert!(!is_hidden_name(OsStr::new("src")));
        assert!(!is_hidden_name(OsStr::new("a.kt")));
        assert!(!is_hidden_name(OsStr::new("")));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_hidden_directory_is_pruned() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b".\xff");
        assert!(is_hidden_name(name));

        let dir = TempDir::new().unwrap();
        let hidden = dir.path().join(name);
        fs::create_dir_all(&hidden).unwrap();
        fs::write(hidden.join("secret.kt"), "line\n").unwrap();
        touch(dir.path(), "visible.kt");

        let set: ExtensionSet = ["kt"].into_iter().collect();
        let files = find_files(dir.path(), &set);
        assert_eq!(relative(dir.path(), &files), vec!["visible.kt"]);
    }

    #[test]
    fn test_filters_by_extension_case_insensitively() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.kt");
        touch(dir.path(), "B.TXT");
        touch(dir.path(), "src/main/App.Kt");
        touch(dir.path(), "src/main/logo.png");
        touch(dir.path(), "Makefile");

        let set: ExtensionSet = ["kt", "txt"].into_iter().collect();
        let files = find_files(dir.path(), &set);

        assert_eq!(
            relative(dir.path(), &files),
            vec!["B.TXT", "a.kt", "src/main/App.Kt"]
        );
    }

    #[test]
    fn test_hidden_directories_are_pruned() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "visible/a.kt");
        touch(dir.path(), ".git/objects/b.kt");
        touch(dir.path(), ".idea/workspace.kt");
        touch(dir.path(), "visible/.cache/deep/c.kt");
        touch(dir.path(), ".hidden.kt");

        let set: ExtensionSet = ["kt"].into_iter().collect();
        let files = find_files(dir.path(), &set);

        assert_eq!(relative(dir.path(), &files), vec!["visible/a.kt"]);
    }

    #[test]
    fn test_root_inside_hidden_directory_is_walked() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".workspace/project/a.kt");

        let set: ExtensionSet = ["kt"].into_iter().collect();
        let root = dir.path().join(".workspace");
        let files = find_files(&root, &set);

        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_empty_extension_set_yields_nothing() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.kt");
        assert!(find_files(dir.path(), &ExtensionSet::new()).is_empty());
    }

    #[test]
    fn test_reflects_current_file_system() {
        let dir = TempDir::new().unwrap();
        let set: ExtensionSet = ["md"].into_iter().collect();
        assert!(find_files(dir.path(), &set).is_empty());

        touch(dir.path(), "docs/README.md");
        assert_eq!(find_files(dir.path(), &set).len(), 1);

        fs::remove_file(dir.path().join("docs/README.md")).unwrap();
        assert!(find_files(dir.path(), &set).is_empty());
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let set: ExtensionSet = ["kt"].into_iter().collect();
        assert!(find_files(Path::new("/nonexistent/path/that/does/not/exist"), &set).is_empty());
    }
}
