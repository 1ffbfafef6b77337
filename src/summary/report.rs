//! Machine-readable migration record (`--json`).

use chrono::{DateTime, Utc};
use serde::Serialize;

use sw2almond_format::Dictionary;

use crate::error::LoadWarning;
use crate::merge::MergeStats;
use crate::migration::MigrationPlan;
use crate::source::DocumentProvenance;

/// Source-side counts.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub vocabulary_count: usize,
    pub replacement_count: usize,
    pub vocabulary: Vec<String>,
    /// Documents that contributed, primary first.
    pub documents: Vec<DocumentProvenance>,
}

/// Full record of a run.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub created_at: DateTime<Utc>,
    pub source: SourceSummary,
    pub migration: MergeStats,
    pub merged_dictionary: Dictionary,
    pub warnings: Vec<LoadWarning>,
}

impl MigrationReport {
    pub fn from_plan(plan: &MigrationPlan) -> Self {
        Self {
            created_at: Utc::now(),
            source: SourceSummary {
                vocabulary_count: plan.source.vocabulary.len(),
                replacement_count: plan.source.replacements.len(),
                vocabulary: plan.source.vocabulary.clone(),
                documents: plan.documents.clone(),
            },
            migration: plan.outcome.stats,
            merged_dictionary: plan.outcome.dictionary.clone(),
            warnings: plan.warnings.clone(),
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::plan_migration;
    use crate::source::{LoadedSources, SourceData};
    use std::path::PathBuf;
    use sw2almond_classifier::Classifier;
    use sw2almond_format::ReplacementRule;

    fn plan() -> MigrationPlan {
        let loaded = LoadedSources {
            data: SourceData {
                vocabulary: vec!["Resync".to_string()],
                replacements: vec![ReplacementRule::new("reink", "Re-Ink")],
            },
            documents: vec![DocumentProvenance {
                path: PathBuf::from("/sw/settings/settings.json"),
                digest: "ab".repeat(32),
            }],
            warnings: vec![LoadWarning::SnapshotUnreadable {
                path: PathBuf::from("/sw/settings/settings.backup.1.json"),
                reason: "bad".to_string(),
            }],
        };
        plan_migration(loaded, &Dictionary::empty(), &Classifier::default(), false)
    }

    #[test]
    fn test_report_shape() {
        let json = MigrationReport::from_plan(&plan()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["source"]["vocabulary_count"], 1);
        assert_eq!(value["source"]["replacement_count"], 1);
        assert_eq!(value["source"]["vocabulary"][0], "Resync");
        assert_eq!(value["source"]["documents"][0]["digest"].as_str().unwrap().len(), 64);
        assert_eq!(value["migration"]["added"], 2);
        assert_eq!(value["migration"]["merged_variants"], 0);
        assert_eq!(value["migration"]["skipped"], 0);
        assert_eq!(value["merged_dictionary"]["version"], 1);
        assert_eq!(
            value["merged_dictionary"]["entries"]["re-ink"]["variants"][0],
            "reink"
        );
        assert_eq!(value["merged_dictionary"]["entries"]["resync"]["isAutoAdded"], false);
        assert_eq!(value["warnings"][0]["kind"], "SNAPSHOT_UNREADABLE");
    }
}
