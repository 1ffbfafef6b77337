//! Default locations of SuperWhisper data and the Almond dictionary on macOS.

use std::path::{Path, PathBuf};

/// SuperWhisper data directory candidates, relative to home, in priority order.
const SUPERWHISPER_CANDIDATES: &[&str] = &[
    "Documents/superwhisper",
    "Documents/superwhisper-recordings",
    "Documents/SuperWhisper",
];

/// Almond dictionary candidates, relative to home, in priority order.
const ALMOND_CANDIDATES: &[&str] = &[
    "Library/Application Support/Almond/dictionary.json",
    "Library/Containers/caleb.almond/Data/Library/Application Support/Almond/dictionary.json",
];

/// The current user's home directory from `$HOME`.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// First candidate directory that contains `settings/settings.json`.
pub fn find_superwhisper_dir(home: &Path) -> Option<PathBuf> {
    SUPERWHISPER_CANDIDATES
        .iter()
        .map(|rel| home.join(rel))
        .find(|dir| dir.join("settings").join("settings.json").exists())
}

/// First existing dictionary candidate, else the default location.
///
/// The default is returned even when missing since Almond creates it lazily.
pub fn find_almond_dictionary(home: &Path) -> PathBuf {
    ALMOND_CANDIDATES
        .iter()
        .map(|rel| home.join(rel))
        .find(|path| path.exists())
        .unwrap_or_else(|| home.join(ALMOND_CANDIDATES[0]))
}
