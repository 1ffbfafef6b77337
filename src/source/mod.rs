//! SourceLoader
//!
//! Reads the SuperWhisper settings document and, optionally, its
//! `settings.backup.*.json` snapshots, and reduces them to one vocabulary
//! list and one deduplicated list of replacement rules.
//!
//! The primary document is always consulted first; snapshots only add terms
//! and rules that were not already seen.

mod snapshots;

pub use snapshots::find_snapshots;

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use sw2almond_format::{normalize_key, FormatError, ReplacementRule, SettingsDocument};

use crate::error::{LoadWarning, MigrationError};

/// File name of the primary settings document inside `settings/`.
pub const SETTINGS_FILE: &str = "settings.json";

/// Normalized source collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceData {
    /// One term per normalized form, in first-seen order and casing.
    pub vocabulary: Vec<String>,
    /// Unique by `(original, with)`, first occurrence kept.
    pub replacements: Vec<ReplacementRule>,
}

impl SourceData {
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty() && self.replacements.is_empty()
    }
}

/// Where a loaded document came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentProvenance {
    pub path: PathBuf,
    /// SHA-256 of the raw file bytes.
    pub digest: String,
}

/// Everything a load produced.
#[derive(Debug, Clone, Default)]
pub struct LoadedSources {
    pub data: SourceData,
    pub documents: Vec<DocumentProvenance>,
    pub warnings: Vec<LoadWarning>,
}

/// Reduce documents, in priority order, to normalized source collections.
pub fn collect_sources<'a, I>(documents: I) -> SourceData
where
    I: IntoIterator<Item = &'a SettingsDocument>,
{
    let mut data = SourceData::default();
    let mut seen_terms: HashSet<String> = HashSet::new();
    let mut seen_rules: HashSet<(String, String)> = HashSet::new();

    for document in documents {
        for term in &document.vocabulary {
            let key = normalize_key(term);
            if key.is_empty() || !seen_terms.insert(key) {
                continue;
            }
            data.vocabulary.push(term.trim().to_string());
        }

        for rule in &document.replacements {
            if rule.is_blank() {
                continue;
            }
            let pair = (rule.original.clone(), rule.with.clone());
            if seen_rules.insert(pair) {
                data.replacements.push(rule.clone());
            }
        }
    }

    data
}

/// Loads settings from a SuperWhisper data directory.
#[derive(Debug, Clone)]
pub struct SourceLoader {
    settings_dir: PathBuf,
    scan_backups: bool,
}

impl SourceLoader {
    /// Loader rooted at a SuperWhisper data directory (the parent of `settings/`).
    pub fn new(data_dir: &Path) -> Self {
        Self {
            settings_dir: data_dir.join("settings"),
            scan_backups: false,
        }
    }

    /// Also consult historical snapshots.
    pub fn with_backups(mut self, scan_backups: bool) -> Self {
        self.scan_backups = scan_backups;
        self
    }

    /// Path of the primary settings document.
    pub fn primary_path(&self) -> PathBuf {
        self.settings_dir.join(SETTINGS_FILE)
    }

    /// Load the primary document and any enabled snapshots.
    ///
    /// Primary failures abort; snapshot failures become warnings.
    pub fn load(&self) -> Result<LoadedSources, MigrationError> {
        let primary_path = self.primary_path();
        let (primary, provenance) = match read_document(&primary_path) {
            Ok(loaded) => loaded,
            Err(e) if e.is_not_found() => return Err(MigrationError::SourceNotFound(primary_path)),
            Err(source) => {
                return Err(MigrationError::SourceUnreadable {
                    path: primary_path,
                    source,
                })
            }
        };
        tracing::debug!(
            path = %primary_path.display(),
            vocabulary = primary.vocabulary.len(),
            replacements = primary.replacements.len(),
            "loaded settings"
        );

        let mut documents = vec![primary];
        let mut loaded = LoadedSources {
            documents: vec![provenance],
            ..Default::default()
        };

        if self.scan_backups {
            for path in find_snapshots(&self.settings_dir) {
                match read_document(&path) {
                    Ok((document, provenance)) => {
                        tracing::debug!(path = %path.display(), "loaded snapshot");
                        documents.push(document);
                        loaded.documents.push(provenance);
                    }
                    Err(e) => {
                        let warning = LoadWarning::SnapshotUnreadable {
                            path,
                            reason: e.to_string(),
                        };
                        tracing::warn!("{}", warning);
                        loaded.warnings.push(warning);
                    }
                }
            }
        }

        loaded.data = collect_sources(&documents);
        tracing::info!(
            documents = documents.len(),
            vocabulary = loaded.data.vocabulary.len(),
            replacements = loaded.data.replacements.len(),
            "collected sources"
        );
        Ok(loaded)
    }
}

fn read_document(path: &Path) -> Result<(SettingsDocument, DocumentProvenance), FormatError> {
    let bytes = fs::read(path).map_err(|e| FormatError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let document = SettingsDocument::from_slice(&bytes)?;
    Ok((
        document,
        DocumentProvenance {
            path: path.to_path_buf(),
            digest: sha256_hex(&bytes),
        },
    ))
}

/// Hex SHA-256 of a byte slice.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
