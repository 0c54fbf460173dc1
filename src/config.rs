//! Platform paths and persisted settings

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::browser::{ExtensionSet, Timing};
use crate::error::{Error, Result};

/// Extensions enabled out of the box
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    // JVM
    "java", "kt", "kts", "groovy", "scala", "clj", "cljs",
    // Web
    "js", "jsx", "ts", "tsx", "vue", "html", "htm", "css", "scss", "sass", "less",
    // Backend
    "py", "php", "rb", "go", "rs", "swift", "dart", "cs", "cpp", "c", "h", "hpp",
    // Config
    "xml", "json", "yaml", "yml", "toml", "ini", "cfg", "conf", "properties", "gradle", "cmake",
    "makefile",
    // Data
    "sql", "csv", "tsv", "log", "txt", "md", "rst",
    // Scripts
    "sh", "bash", "zsh", "fish", "ps1", "bat", "cmd",
    // Containers
    "dockerfile",
    // Docs
    "markdown", "adoc", "asciidoc", "tex",
    // Misc
    "svg", "json5", "proto", "thrift", "avro", "graphql",
];

/// Extensions selected by `types default`
pub const QUICK_DEFAULT_EXTENSIONS: &[&str] =
    &["java", "kt", "xml", "json", "properties", "md", "txt"];

/// Extension categories offered by `types list`
pub const CATALOG: &[(&str, &[&str])] = &[
    ("Java", &["java", "kt", "kts", "groovy"]),
    ("Web", &["js", "jsx", "ts", "tsx", "vue", "html", "css"]),
    ("Backend", &["py", "php", "go", "rs", "cpp", "c"]),
    ("Config", &["xml", "json", "yaml", "properties", "gradle"]),
    ("Data", &["sql", "txt", "md", "log", "csv"]),
    ("Script", &["sh", "bat", "cmd", "ps1"]),
];

/// Every extension that appears in [`CATALOG`]
pub fn catalog_extensions() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().flat_map(|(_, exts)| exts.iter().copied())
}

/// Get the settings file path
/// - macOS: ~/Library/Application Support/iam-working/settings.json
/// - Linux: ~/.config/iam-working/settings.json
/// - Windows: %APPDATA%/iam-working/settings.json
pub fn settings_path() -> Result<PathBuf> {
    let config = dirs::config_dir().ok_or(Error::NoConfigDir)?;
    Ok(config.join("iam-working").join("settings.json"))
}

/// User settings persisted between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub extensions: ExtensionSet,
    pub timing: Timing,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().collect(),
            timing: Timing::default(),
        }
    }
}

impl Settings {
    /// Load settings from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&settings_path()?)
    }

    /// Load settings from `path`, or return defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| Error::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| Error::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = settings_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let io_err = |source| Error::SettingsIo {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|source| Error::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, content).map_err(io_err)?;

        tracing::debug!(path = %path.display(), "Settings saved");
        Ok(())
    }
}
