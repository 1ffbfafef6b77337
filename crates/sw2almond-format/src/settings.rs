//! SuperWhisper settings document (`settings/settings.json`).
//!
//! Only the two fields the migration consumes are modelled; everything else
//! in the settings file is ignored. Both fields default to empty when absent.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::FormatError;

/// A SuperWhisper settings document or one of its backup snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsDocument {
    /// Terms the speech model should recognize.
    #[serde(default)]
    pub vocabulary: Vec<String>,

    /// Voice shortcuts and corrections.
    #[serde(default)]
    pub replacements: Vec<ReplacementRule>,
}

/// "When the user says `original`, insert `with`."
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplacementRule {
    /// SuperWhisper's identifier; not used for merging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,

    #[serde(default)]
    pub original: String,

    #[serde(default)]
    pub with: String,
}

impl ReplacementRule {
    pub fn new(original: impl Into<String>, with: impl Into<String>) -> Self {
        Self {
            id: None,
            original: original.into(),
            with: with.into(),
        }
    }

    /// Deduplication key: the raw `(original, with)` pair.
    pub fn pair(&self) -> (&str, &str) {
        (&self.original, &self.with)
    }

    /// True when either side is blank after trimming.
    pub fn is_blank(&self) -> bool {
        self.original.trim().is_empty() || self.with.trim().is_empty()
    }
}

impl SettingsDocument {
    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse from raw file bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Load from file
    pub fn from_file(path: &Path) -> Result<Self, FormatError> {
        let bytes = fs::read(path).map_err(|e| FormatError::io(path, e))?;
        Self::from_slice(&bytes)
    }

    /// True when the document carries neither vocabulary nor replacements.
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty() && self.replacements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let json = r#"{
            "vocabulary": ["Resync", "Almond"],
            "replacements": [
                {"id": "A1B2", "original": "reink", "with": "Re-Ink"}
            ],
            "theme": "dark",
            "hotkey": {"key": "space"}
        }"#;

        let doc = SettingsDocument::from_json(json).unwrap();
        assert_eq!(doc.vocabulary, vec!["Resync", "Almond"]);
        assert_eq!(doc.replacements.len(), 1);
        assert_eq!(doc.replacements[0].original, "reink");
        assert_eq!(doc.replacements[0].with, "Re-Ink");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let doc = SettingsDocument::from_json(r#"{"theme": "light"}"#).unwrap();
        assert!(doc.vocabulary.is_empty());
        assert!(doc.replacements.is_empty());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_replacement_missing_sides_default() {
        let doc = SettingsDocument::from_json(r#"{"replacements": [{"original": "x"}]}"#).unwrap();
        assert_eq!(doc.replacements[0].with, "");
        assert!(doc.replacements[0].is_blank());
    }

    #[test]
    fn test_numeric_id_is_accepted() {
        let doc =
            SettingsDocument::from_json(r#"{"replacements": [{"id": 7, "original": "a", "with": "b"}]}"#)
                .unwrap();
        assert_eq!(doc.replacements[0].pair(), ("a", "b"));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(SettingsDocument::from_json("{ not json").is_err());
    }

    #[test]
    fn test_blank_after_trim() {
        assert!(ReplacementRule::new("  ", "x").is_blank());
        assert!(ReplacementRule::new("x", "\t").is_blank());
        assert!(!ReplacementRule::new("x", "y").is_blank());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = SettingsDocument::from_file(Path::new("/nonexistent/settings.json")).unwrap_err();
        assert!(err.is_not_found());
    }
}
