//! Writing the merged dictionary
//!
//! Almond keeps its dictionary in memory and rewrites `dictionary.json` on
//! its own schedule, so an apply refuses to run while Almond is live unless
//! forced, and always copies the previous file aside before replacing it.

use chrono::{DateTime, Local};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use sw2almond_format::{Dictionary, FormatError};

use crate::error::MigrationError;
use crate::merge::MergeOutcome;

/// Reports whether the consuming application is currently running.
pub trait LivenessProbe {
    /// Human-readable name of what is probed.
    fn target(&self) -> &str;

    fn is_running(&self) -> bool;
}

/// Probe via `pgrep -f <pattern>`.
#[derive(Debug, Clone)]
pub struct PgrepProbe {
    pattern: String,
}

impl PgrepProbe {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl LivenessProbe for PgrepProbe {
    fn target(&self) -> &str {
        &self.pattern
    }

    fn is_running(&self) -> bool {
        match Command::new("pgrep").arg("-f").arg(&self.pattern).output() {
            Ok(output) => output.status.success(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("pgrep not available, skipping liveness check");
                false
            }
            Err(e) => {
                tracing::warn!("liveness check failed: {}", e);
                false
            }
        }
    }
}

/// Refuse when the consuming application is live, unless `force` is set.
pub fn ensure_writer_idle(probe: &dyn LivenessProbe, force: bool) -> Result<(), MigrationError> {
    if !probe.is_running() {
        return Ok(());
    }
    if force {
        tracing::warn!("{} is running; applying anyway because of --force", probe.target());
        return Ok(());
    }
    Err(MigrationError::ConflictingWriter {
        process: probe.target().to_string(),
    })
}

/// `<path>.backup.<YYYYmmdd_HHMMSS>`
pub fn backup_path(path: &Path, at: DateTime<Local>) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(format!(".backup.{}", at.format("%Y%m%d_%H%M%S")));
    PathBuf::from(name)
}

/// Copy `path` aside with a timestamp suffix. `None` when there is nothing to back up.
pub fn backup_file(path: &Path, at: DateTime<Local>) -> Result<Option<PathBuf>, MigrationError> {
    if !path.exists() {
        return Ok(None);
    }
    let backup = backup_path(path, at);
    fs::copy(path, &backup).map_err(|e| MigrationError::Write {
        path: backup.clone(),
        source: FormatError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    tracing::info!(backup = %backup.display(), "backed up dictionary");
    Ok(Some(backup))
}

/// Write the merged dictionary to an arbitrary file instead of Almond's.
pub fn export(dictionary: &Dictionary, destination: &Path) -> Result<(), MigrationError> {
    dictionary
        .write_to_file(destination)
        .map_err(|e| MigrationError::write(destination, e))?;
    tracing::info!(path = %destination.display(), "exported dictionary");
    Ok(())
}

/// What an apply did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyResult {
    /// The merge added nothing; the dictionary was left alone.
    Unchanged,
    /// The dictionary was rewritten.
    Written {
        path: PathBuf,
        backup: Option<PathBuf>,
    },
}

/// Applies a merge outcome to Almond's dictionary file.
pub struct Applier<'a> {
    target: &'a Path,
    probe: &'a dyn LivenessProbe,
    force: bool,
}

impl<'a> Applier<'a> {
    pub fn new(target: &'a Path, probe: &'a dyn LivenessProbe) -> Self {
        Self {
            target,
            probe,
            force: false,
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Back up the current file, then replace it with the merged dictionary.
    pub fn apply(&self, outcome: &MergeOutcome, at: DateTime<Local>) -> Result<ApplyResult, MigrationError> {
        ensure_writer_idle(self.probe, self.force)?;

        if !outcome.stats.has_changes() {
            return Ok(ApplyResult::Unchanged);
        }

        let backup = backup_file(self.target, at)?;

        if let Some(parent) = self.target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| MigrationError::Write {
                path: self.target.to_path_buf(),
                source: FormatError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                },
            })?;
        }

        outcome
            .dictionary
            .write_to_file(self.target)
            .map_err(|e| MigrationError::write(self.target, e))?;
        tracing::info!(path = %self.target.display(), "wrote dictionary");

        Ok(ApplyResult::Written {
            path: self.target.to_path_buf(),
            backup,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::MergeStats;
    use chrono::TimeZone;
    use sw2almond_format::DictionaryEntry;
    use tempfile::TempDir;

    struct FixedProbe(bool);

    impl LivenessProbe for FixedProbe {
        fn target(&self) -> &str {
            "Almond.app"
        }

        fn is_running(&self) -> bool {
            self.0
        }
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap()
    }

    fn outcome_with_change() -> MergeOutcome {
        let mut dictionary = Dictionary::empty();
        dictionary
            .entries
            .insert("resync".to_string(), DictionaryEntry::new("Resync"));
        MergeOutcome {
            dictionary,
            stats: MergeStats {
                added: 1,
                merged_variants: 0,
                skipped: 0,
            },
            added_keys: vec!["resync".to_string()],
        }
    }

    #[test]
    fn test_backup_path_format() {
        let path = backup_path(Path::new("/a/dictionary.json"), fixed_time());
        assert_eq!(path, PathBuf::from("/a/dictionary.json.backup.20250304_050607"));
    }

    #[test]
    fn test_backup_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let result = backup_file(&dir.path().join("missing.json"), fixed_time()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_running_app_blocks_apply() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("dictionary.json");
        let probe = FixedProbe(true);

        let err = Applier::new(&target, &probe)
            .apply(&outcome_with_change(), fixed_time())
            .unwrap_err();
        assert!(matches!(err, MigrationError::ConflictingWriter { .. }));
        assert!(!target.exists());
    }

    #[test]
    fn test_force_overrides_running_app() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("dictionary.json");
        let probe = FixedProbe(true);

        let result = Applier::new(&target, &probe)
            .force(true)
            .apply(&outcome_with_change(), fixed_time())
            .unwrap();
        assert!(matches!(result, ApplyResult::Written { backup: None, .. }));
        assert!(target.exists());
    }

    #[test]
    fn test_apply_backs_up_existing_and_creates_dirs() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("Almond").join("dictionary.json");
        let probe = FixedProbe(false);

        let first = Applier::new(&target, &probe)
            .apply(&outcome_with_change(), fixed_time())
            .unwrap();
        assert_eq!(
            first,
            ApplyResult::Written {
                path: target.clone(),
                backup: None
            }
        );

        let before = fs::read_to_string(&target).unwrap();
        let second = Applier::new(&target, &probe)
            .apply(&outcome_with_change(), fixed_time())
            .unwrap();
        let ApplyResult::Written { backup: Some(backup), .. } = &second else {
            panic!("expected a backup, got {:?}", second);
        };
        assert_eq!(fs::read_to_string(backup).unwrap(), before);

        let written = Dictionary::from_file(&target).unwrap();
        assert_eq!(written.entries["resync"].canonical, "Resync");
    }

    #[test]
    fn test_unchanged_merge_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("dictionary.json");
        let probe = FixedProbe(false);
        let outcome = MergeOutcome {
            dictionary: Dictionary::empty(),
            stats: MergeStats {
                added: 0,
                merged_variants: 0,
                skipped: 4,
            },
            added_keys: vec![],
        };

        let result = Applier::new(&target, &probe).apply(&outcome, fixed_time()).unwrap();
        assert_eq!(result, ApplyResult::Unchanged);
        assert!(!target.exists());
    }

    #[test]
    fn test_export_writes_destination() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("merged.json");
        export(&outcome_with_change().dictionary, &dest).unwrap();
        let exported = Dictionary::from_file(&dest).unwrap();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported.version, 1);
    }

    #[test]
    fn test_ensure_writer_idle() {
        assert!(ensure_writer_idle(&FixedProbe(false), false).is_ok());
        assert!(ensure_writer_idle(&FixedProbe(true), true).is_ok());
        assert!(ensure_writer_idle(&FixedProbe(true), false).is_err());
    }
}
