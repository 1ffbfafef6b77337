//! Discovery of SuperWhisper settings snapshots.

use globset::{Glob, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name pattern SuperWhisper uses for its settings backups.
pub const SNAPSHOT_PATTERN: &str = "settings.backup.*.json";

fn snapshot_matcher() -> Option<GlobMatcher> {
    match Glob::new(SNAPSHOT_PATTERN) {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(e) => {
            tracing::warn!("invalid snapshot pattern: {}", e);
            None
        }
    }
}

/// Snapshot files directly inside `settings_dir`, in lexicographic path order.
///
/// An unreadable or missing directory yields no snapshots.
pub fn find_snapshots(settings_dir: &Path) -> Vec<PathBuf> {
    let Some(matcher) = snapshot_matcher() else {
        return Vec::new();
    };

    let mut paths: Vec<PathBuf> = WalkDir::new(settings_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| matcher.is_match(entry.file_name()))
        .map(|entry| entry.into_path())
        .collect();

    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_finds_backups_sorted() {
        let dir = TempDir::new().unwrap();
        for name in [
            "settings.backup.20240301.json",
            "settings.backup.20240101.json",
            "settings.json",
            "settings.backup.notes.txt",
            "other.json",
        ] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }

        let found = find_snapshots(dir.path());
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["settings.backup.20240101.json", "settings.backup.20240301.json"]
        );
    }

    #[test]
    fn test_ignores_nested_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("old");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("settings.backup.1.json"), "{}").unwrap();
        assert!(find_snapshots(dir.path()).is_empty());
    }

    #[test]
    fn test_missing_directory_is_empty() {
        assert!(find_snapshots(Path::new("/nonexistent/settings")).is_empty());
    }
}
