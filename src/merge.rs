//! Merger
//!
//! Folds candidate entries into an existing Almond dictionary. Existing
//! entries are never replaced: a colliding key can only gain variants, and
//! its canonical text and auto-added flag stay exactly as they were.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use sw2almond_format::{Dictionary, DICTIONARY_VERSION};

use crate::entries::CandidateEntries;

/// Per-run merge counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Keys newly inserted.
    pub added: usize,
    /// Variant strings newly merged into existing keys.
    pub merged_variants: usize,
    /// Keys whose proposed content was already present.
    pub skipped: usize,
}

impl MergeStats {
    /// Whether applying the merge would change the dictionary.
    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.merged_variants > 0
    }
}

/// Result of a merge: the proposed next dictionary and what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub dictionary: Dictionary,
    pub stats: MergeStats,
    /// Keys that were not in the existing dictionary, in candidate order.
    pub added_keys: Vec<String>,
}

/// Merge candidates into `existing`, returning the proposed next state.
///
/// `existing` is not modified.
pub fn merge(existing: &Dictionary, candidates: &CandidateEntries) -> MergeOutcome {
    let mut merged = existing.clone();
    merged.version = DICTIONARY_VERSION;

    let mut stats = MergeStats::default();
    let mut added_keys = Vec::new();

    for (key, candidate) in candidates.iter() {
        let Some(current) = merged.entries.get_mut(key) else {
            merged.entries.insert(key.to_string(), candidate.clone());
            added_keys.push(key.to_string());
            stats.added += 1;
            continue;
        };

        let known: BTreeSet<&str> = current.variants.iter().map(String::as_str).collect();
        let fresh: BTreeSet<&str> = candidate
            .variants
            .iter()
            .map(String::as_str)
            .filter(|v| !known.contains(v))
            .collect();

        if fresh.is_empty() {
            stats.skipped += 1;
            continue;
        }

        stats.merged_variants += fresh.len();
        let union: Vec<String> = known.union(&fresh).map(|v| v.to_string()).collect();
        current.variants = union;
    }

    tracing::info!(
        added = stats.added,
        merged_variants = stats.merged_variants,
        skipped = stats.skipped,
        "merged candidates"
    );

    MergeOutcome {
        dictionary: merged,
        stats,
        added_keys,
    }
}
