//! EntryBuilder
//!
//! Turns normalized vocabulary and classified replacements into candidate
//! Almond entries, before any comparison with the persisted dictionary.
//!
//! Vocabulary is processed first so that a vocabulary term always owns its
//! key: later replacements for the same key can only add variants, never
//! change the canonical text. Within each pass the first-seen text wins.

use std::collections::HashMap;

use sw2almond_classifier::{Category, Classifier};
use sw2almond_format::{normalize_key, DictionaryEntry};

use crate::source::SourceData;

/// Candidate entries keyed by normalized text, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateEntries {
    order: Vec<String>,
    entries: HashMap<String, DictionaryEntry>,
}

impl CandidateEntries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&DictionaryEntry> {
        self.entries.get(key)
    }

    /// Insert unless the key is already taken. Returns whether it was inserted.
    pub fn insert_if_absent(&mut self, key: String, entry: DictionaryEntry) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.order.push(key.clone());
        self.entries.insert(key, entry);
        true
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut DictionaryEntry> {
        self.entries.get_mut(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `(key, entry)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DictionaryEntry)> {
        self.order
            .iter()
            .filter_map(move |key| self.entries.get(key).map(|entry| (key.as_str(), entry)))
    }
}

/// Build candidate entries from loaded sources.
pub fn build_entries(
    source: &SourceData,
    classifier: &Classifier,
    include_macros: bool,
) -> CandidateEntries {
    let mut candidates = CandidateEntries::new();

    for term in &source.vocabulary {
        let key = normalize_key(term);
        if key.is_empty() {
            continue;
        }
        candidates.insert_if_absent(key, DictionaryEntry::new(term.as_str()));
    }

    for rule in &source.replacements {
        match classifier.classify(&rule.original, &rule.with) {
            Category::Command => continue,
            Category::Macro if !include_macros => continue,
            Category::Macro | Category::Spelling => {}
        }

        let original = rule.original.trim();
        let with = rule.with.trim();
        let key = normalize_key(with);
        if key.is_empty() {
            continue;
        }

        match candidates.get_mut(&key) {
            Some(entry) => {
                if !original.is_empty() && !entry.has_variant(original) {
                    entry.variants.push(original.to_string());
                }
            }
            None => {
                let variants = if original.is_empty() { vec![] } else { vec![original] };
                candidates.insert_if_absent(key, DictionaryEntry::new(with).with_variants(variants));
            }
        }
    }

    tracing::debug!(candidates = candidates.len(), include_macros, "built candidate entries");
    candidates
}
