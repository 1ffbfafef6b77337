//! Almond dictionary document (`dictionary.json`).
//!
//! `{entries: {key: {canonical, isAutoAdded, variants}}, version: 1}`.
//! Fields this tool does not know about are carried through untouched so a
//! rewrite never drops data Almond put there.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::FormatError;
use crate::DICTIONARY_VERSION;

/// A complete Almond dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dictionary {
    /// Entries keyed by the lowercased canonical text.
    pub entries: BTreeMap<String, DictionaryEntry>,

    #[serde(default = "default_version")]
    pub version: i64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_version() -> i64 {
    DICTIONARY_VERSION
}

/// One dictionary entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// The text the entry resolves to.
    #[serde(default)]
    pub canonical: String,

    /// Whether Almond learned the entry on its own.
    #[serde(default, rename = "isAutoAdded")]
    pub is_auto_added: bool,

    /// Surface forms that should resolve to `canonical`.
    #[serde(default)]
    pub variants: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DictionaryEntry {
    /// A user-defined entry with no variants.
    pub fn new(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            ..Default::default()
        }
    }

    /// Builder-style variant list.
    pub fn with_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants = variants.into_iter().map(Into::into).collect();
        self
    }

    /// Exact, case-sensitive membership.
    pub fn has_variant(&self, variant: &str) -> bool {
        self.variants.iter().any(|v| v == variant)
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            version: DICTIONARY_VERSION,
            extra: Map::new(),
        }
    }
}

impl Dictionary {
    /// `{entries: {}, version: 1}`
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Parse from raw file bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FormatError> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    fn from_value(value: Value) -> Result<Self, FormatError> {
        if value.get("entries").is_none() {
            return Err(FormatError::MissingEntries);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Load from file
    pub fn from_file(path: &Path) -> Result<Self, FormatError> {
        let bytes = fs::read(path).map_err(|e| FormatError::io(path, e))?;
        Self::from_slice(&bytes)
    }

    /// Serialize to pretty JSON. Non-ASCII text is written verbatim.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write atomically to file (write-then-rename)
    pub fn write_to_file(&self, path: &Path) -> Result<(), FormatError> {
        let json = self.to_json()?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(|e| FormatError::io(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| FormatError::io(path, e))?;

        Ok(())
    }
}
