//! Shared utilities for commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use iam_working::browser::ExtensionSet;
use iam_working::config::Settings;

/// Resolve the project root, defaulting to the current directory
///
/// On Windows, `canonicalize()` returns paths like `\\?\C:\path` which display
/// poorly, so the extended-length prefix is stripped.
pub fn resolve_project(project: Option<&str>) -> Result<PathBuf> {
    let path = match project {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let path = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !path.is_dir() {
        anyhow::bail!("Not a directory: {}", path.display());
    }

    let stripped = path
        .to_string_lossy()
        .strip_prefix(r"\\?\")
        .map(PathBuf::from);
    Ok(stripped.unwrap_or(path))
}

/// Extensions from `--ext` if given, otherwise the saved settings
pub fn resolve_extensions(overrides: &[String], settings: &Settings) -> ExtensionSet {
    if overrides.is_empty() {
        settings.extensions.clone()
    } else {
        overrides
            .iter()
            .flat_map(|s| s.split(','))
            .collect()
    }
}

/// Path relative to the project root, with forward slashes
pub fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_extensions_prefers_overrides() {
        let settings = Settings::default();
        let set = resolve_extensions(&["KT,.txt".to_string(), "md".to_string()], &settings);
        assert_eq!(set.to_string(), "kt, md, txt");
    }

    #[test]
    fn test_resolve_extensions_falls_back_to_settings() {
        let settings = Settings::default();
        assert_eq!(resolve_extensions(&[], &settings), settings.extensions);
    }

    #[test]
    fn test_relative_display() {
        let root = Path::new("/home/me/project");
        assert_eq!(
            relative_display(root, Path::new("/home/me/project/src/a.kt")),
            "src/a.kt"
        );
        assert_eq!(relative_display(root, Path::new("/elsewhere/b.kt")), "/elsewhere/b.kt");
    }

    #[test]
    fn test_resolve_project_nonexistent() {
        let result = resolve_project(Some("/nonexistent/path/that/does/not/exist"));
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_project_rejects_files() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = resolve_project(file.path().to_str());
        assert!(result.is_err());
    }
}
