//! Scan command - Show which files would be candidates for opening

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;

use super::utils;
use iam_working::browser::{selector, ExtensionSet};
use iam_working::config::Settings;

/// Execute the scan command
pub fn execute(project: Option<&str>, overrides: &[String]) -> Result<()> {
    let root = utils::resolve_project(project)?;
    let settings = Settings::load().context("Failed to load settings")?;
    let extensions = utils::resolve_extensions(overrides, &settings);

    let files = scan(&root, &extensions);
    for file in &files {
        println!("  {}", file);
    }

    if extensions.is_empty() {
        println!("{}", "No file types selected.".yellow());
    }
    println!(
        "\n{} candidate file(s) in {}",
        files.len().to_string().green(),
        root.display()
    );

    Ok(())
}

/// Candidate files under `root`, relative to it
pub fn scan(root: &Path, extensions: &ExtensionSet) -> Vec<String> {
    selector::find_files(root, extensions)
        .iter()
        .map(|path| utils::relative_display(root, path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_lists_relative_candidates() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join(".idea")).unwrap();
        fs::write(dir.path().join("src/a.kt"), "fun a() {}\n").unwrap();
        fs::write(dir.path().join("b.txt"), "b\n").unwrap();
        fs::write(dir.path().join(".idea/c.txt"), "c\n").unwrap();

        let set: ExtensionSet = ["kt", "txt"].into_iter().collect();
        let mut files = scan(dir.path(), &set);
        files.sort();
        assert_eq!(files, vec!["b.txt", "src/a.kt"]);
    }
}
