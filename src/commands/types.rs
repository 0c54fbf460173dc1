//! Types command - Choose which file types get opened

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;

use iam_working::config::{self, Settings, CATALOG, QUICK_DEFAULT_EXTENSIONS};

/// What to do with the saved extension set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypesAction {
    /// Show the catalog with enabled types marked
    List,
    /// Enable the given extensions
    Enable(Vec<String>),
    /// Disable the given extensions
    Disable(Vec<String>),
    /// Enable every catalog extension
    All,
    /// Disable every catalog extension
    Clear,
    /// Catalog extensions become exactly the quick default set
    Default,
    /// Print the settings file location
    Path,
}

/// Execute the types command
pub fn execute(action: TypesAction) -> Result<()> {
    match action {
        TypesAction::List => {
            let settings = Settings::load().context("Failed to load settings")?;
            println!("{}", render(&settings));
        }
        TypesAction::Path => {
            let path = config::settings_path()?;
            println!("{}", path.display());
        }
        action => {
            let mut settings = Settings::load().context("Failed to load settings")?;
            apply(&mut settings, &action);
            settings.save().context("Failed to save settings")?;
            println!("{}", "File type settings saved".green());
        }
    }
    Ok(())
}

/// Apply a modifying action to `settings`; returns true if anything changed
pub fn apply(settings: &mut Settings, action: &TypesAction) -> bool {
    let before = settings.extensions.clone();
    let extensions = &mut settings.extensions;

    match action {
        TypesAction::Enable(exts) => {
            for ext in exts.iter().flat_map(|e| e.split(',')) {
                extensions.insert(ext);
            }
        }
        TypesAction::Disable(exts) => {
            for ext in exts.iter().flat_map(|e| e.split(',')) {
                extensions.remove(ext);
            }
        }
        TypesAction::All => {
            for ext in config::catalog_extensions() {
                extensions.insert(ext);
            }
        }
        TypesAction::Clear => {
            for ext in config::catalog_extensions() {
                extensions.remove(ext);
            }
        }
        TypesAction::Default => {
            for ext in config::catalog_extensions() {
                if QUICK_DEFAULT_EXTENSIONS.contains(&ext) {
                    extensions.insert(ext);
                } else {
                    extensions.remove(ext);
                }
            }
        }
        TypesAction::List | TypesAction::Path => {}
    }

    settings.extensions != before
}

/// Render the catalog as a table with enabled types marked
pub fn render(settings: &Settings) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![Cell::new("Category"), Cell::new("File types")]);

    for (category, exts) in CATALOG {
        let marks: Vec<String> = exts
            .iter()
            .map(|ext| mark(settings.extensions.contains(ext), ext))
            .collect();
        table.add_row(vec![Cell::new(category), Cell::new(marks.join("  "))]);
    }

    let others: Vec<String> = settings
        .extensions
        .iter()
        .filter(|ext| !config::catalog_extensions().any(|c| c == *ext))
        .map(|ext| format!(".{}", ext))
        .collect();
    if !others.is_empty() {
        table.add_row(vec![Cell::new("Other"), Cell::new(others.join(" "))]);
    }

    let mut output = table.to_string();
    output.push_str(&format!(
        "\n\n{} file type(s) enabled",
        settings.extensions.len()
    ));
    output
}

fn mark(enabled: bool, ext: &str) -> String {
    if enabled {
        format!("[x] .{}", ext)
    } else {
        format!("[ ] .{}", ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iam_working::browser::ExtensionSet;

    fn settings_with(exts: &[&str]) -> Settings {
        Settings {
            extensions: exts.iter().collect(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_enable_and_disable() {
        let mut settings = settings_with(&["kt"]);
        assert!(apply(
            &mut settings,
            &TypesAction::Enable(vec![".RS".to_string(), "toml,md".to_string()])
        ));
        assert_eq!(settings.extensions.to_string(), "kt, md, rs, toml");

        assert!(apply(
            &mut settings,
            &TypesAction::Disable(vec!["KT".to_string()])
        ));
        assert!(!settings.extensions.contains("kt"));

        // Disabling something absent changes nothing
        assert!(!apply(
            &mut settings,
            &TypesAction::Disable(vec!["kt".to_string()])
        ));
    }

    #[test]
    fn test_select_all_and_clear_all() {
        let mut settings = settings_with(&["proto"]);
        apply(&mut settings, &TypesAction::All);
        for ext in config::catalog_extensions() {
            assert!(settings.extensions.contains(ext));
        }

        apply(&mut settings, &TypesAction::Clear);
        // Types outside the catalog are left alone
        assert_eq!(settings.extensions, ["proto"].into_iter().collect::<ExtensionSet>());
    }

    #[test]
    fn test_default_selection() {
        let mut settings = settings_with(&["go", "proto", "kt"]);
        apply(&mut settings, &TypesAction::Default);

        for ext in QUICK_DEFAULT_EXTENSIONS {
            assert!(settings.extensions.contains(ext));
        }
        assert!(!settings.extensions.contains("go"));
        assert!(settings.extensions.contains("proto"));
    }

    #[test]
    fn test_render_marks_enabled_types() {
        let settings = settings_with(&["kt", "proto"]);
        let output = render(&settings);
        assert!(output.contains("[x] .kt"));
        assert!(output.contains("[ ] .java"));
        assert!(output.contains(".proto"));
        assert!(output.contains("2 file type(s) enabled"));
    }
}
