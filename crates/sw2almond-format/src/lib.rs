//! SuperWhisper and Almond document types
//!
//! Defines the two on-disk JSON shapes the migration reads and writes:
//! the SuperWhisper settings document and the Almond dictionary document.

pub mod dictionary;
pub mod error;
pub mod settings;

pub use dictionary::{Dictionary, DictionaryEntry};
pub use error::FormatError;
pub use settings::{ReplacementRule, SettingsDocument};

/// Dictionary format version written by this implementation.
pub const DICTIONARY_VERSION: i64 = 1;

/// Normalize a term into its dictionary key form (trimmed, lowercased).
pub fn normalize_key(text: &str) -> String {
    text.trim().to_lowercase()
}
