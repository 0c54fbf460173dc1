//! Extension set used to filter candidate files
//!
//! Extensions are stored lowercase without the leading dot, so `".KT"`,
//! `"kt"` and `"Kt"` all name the same entry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

/// Normalize a user-supplied extension: trim, strip leading dots, lowercase
///
/// Returns `None` for strings that are empty once normalized.
pub fn normalize(ext: &str) -> Option<String> {
    let ext = ext.trim().trim_start_matches('.').trim();
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

/// A set of lowercase file extensions (no dot)
///
/// An empty set is valid and matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeSet<String>", into = "BTreeSet<String>")]
pub struct ExtensionSet(BTreeSet<String>);

impl ExtensionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an extension; returns `true` if it was not present
    pub fn insert(&mut self, ext: &str) -> bool {
        match normalize(ext) {
            Some(ext) => self.0.insert(ext),
            None => false,
        }
    }

    /// Remove an extension; returns `true` if it was present
    pub fn remove(&mut self, ext: &str) -> bool {
        match normalize(ext) {
            Some(ext) => self.0.remove(&ext),
            None => false,
        }
    }

    pub fn contains(&self, ext: &str) -> bool {
        normalize(ext).is_some_and(|ext| self.0.contains(&ext))
    }

    /// Case-insensitive membership test for a path's extension
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.contains(ext))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExtensionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for ext in iter {
            set.insert(ext.as_ref());
        }
        set
    }
}

impl From<BTreeSet<String>> for ExtensionSet {
    fn from(raw: BTreeSet<String>) -> Self {
        raw.iter().collect()
    }
}

impl From<ExtensionSet> for BTreeSet<String> {
    fn from(set: ExtensionSet) -> Self {
        set.0
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(".KT"), Some("kt".to_string()));
        assert_eq!(normalize("  Json "), Some("json".to_string()));
        assert_eq!(normalize("."), None);
        assert_eq!(normalize(""), None);
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let set: ExtensionSet = ["kt", "TXT"].into_iter().collect();
        assert!(set.matches(Path::new("src/Main.KT")));
        assert!(set.matches(Path::new("notes.txt")));
        assert!(set.matches(Path::new("README.Txt")));
        assert!(!set.matches(Path::new("build.gradle")));
        assert!(!set.matches(Path::new("Makefile")));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let set = ExtensionSet::new();
        assert!(set.is_empty());
        assert!(!set.matches(Path::new("a.kt")));
    }

    #[test]
    fn test_insert_and_remove_normalize() {
        let mut set = ExtensionSet::new();
        assert!(set.insert(".Rs"));
        assert!(!set.insert("rs"));
        assert!(set.contains("RS"));
        assert!(set.remove(".rs"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_deserialize_normalizes() {
        let set: ExtensionSet = serde_json::from_str(r#"["Java", ".kt", "java", ""]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.to_string(), "java, kt");
    }
}
