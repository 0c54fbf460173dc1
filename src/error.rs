//! Error types for iam-working
//!
//! Nothing inside a tick is fatal: host failures are reported as [`HostError`]
//! and swallowed by the simulator. [`Error`] covers the operations a caller
//! actually has to handle (starting the schedulers, loading settings).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a host while opening or driving a document
#[derive(Debug, Error)]
pub enum HostError {
    /// The file disappeared between selection and open
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The host refuses to open this kind of file (binary, too large, ...)
    #[error("Unsupported document: {}", .0.display())]
    Unsupported(PathBuf),

    /// The view was closed or replaced
    #[error("View is no longer open")]
    Closed,
}

/// Errors surfaced to callers of the library
#[derive(Debug, Error)]
pub enum Error {
    /// A scheduler thread could not be spawned
    #[error("Failed to spawn {name} scheduler: {source}")]
    Spawn {
        name: &'static str,
        #[source]
        source: io::Error,
    },

    /// Settings file I/O
    #[error("Settings I/O error ({}): {source}", .path.display())]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Settings file exists but is not valid JSON
    #[error("Failed to parse settings ({}): {source}", .path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No usable configuration directory on this platform
    #[error("Could not determine config directory")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_messages() {
        let err = HostError::NotFound(PathBuf::from("/tmp/gone.kt"));
        assert_eq!(err.to_string(), "File not found: /tmp/gone.kt");
        assert_eq!(HostError::Closed.to_string(), "View is no longer open");
    }

    #[test]
    fn test_spawn_error_keeps_source() {
        let err = Error::Spawn {
            name: "activity",
            source: io::Error::other("no threads left"),
        };
        assert!(err.to_string().contains("activity"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
