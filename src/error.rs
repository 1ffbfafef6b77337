//! Error and warning kinds for a migration run.
//!
//! Errors abort the run before anything is written. Warnings describe inputs
//! that were degraded to empty and the run continued without them.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use sw2almond_format::FormatError;

use crate::config::ConfigError;

/// Fatal migration errors.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("SuperWhisper settings not found at {0}")]
    SourceNotFound(PathBuf),

    #[error("Could not find SuperWhisper data directory")]
    SourceDirNotFound,

    #[error("SuperWhisper settings at {path} are unreadable: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("{process} is currently running and may overwrite the dictionary")]
    ConflictingWriter { process: String },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("Failed to serialize report: {0}")]
    Report(#[source] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl MigrationError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: impl Into<FormatError>) -> Self {
        Self::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Recovered problems, reported to the user but not fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadWarning {
    /// A historical snapshot could not be parsed and was skipped.
    SnapshotUnreadable { path: PathBuf, reason: String },
    /// The existing dictionary was corrupt; migration proceeds from empty.
    TargetUnreadable { path: PathBuf, reason: String },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SnapshotUnreadable { path, reason } => {
                write!(f, "Skipping unreadable snapshot {}: {}", path.display(), reason)
            }
            Self::TargetUnreadable { path, reason } => write!(
                f,
                "Existing dictionary {} is unreadable, treating it as empty: {}",
                path.display(),
                reason
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_error_keeps_serializer_cause() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let expected = cause.to_string();
        let err = MigrationError::Report(cause);

        assert!(err.to_string().starts_with("Failed to serialize report: "));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), expected);
    }

    #[test]
    fn test_conflicting_writer_names_process() {
        let err = MigrationError::ConflictingWriter {
            process: "Almond.app".to_string(),
        };
        assert!(err.to_string().starts_with("Almond.app is currently running"));
    }
}
