//! sw2almond - SuperWhisper to Almond vocabulary migration
//!
//! Reads SuperWhisper's custom vocabulary and text replacements, classifies
//! the replacements, and merges the result into Almond's dictionary without
//! disturbing entries Almond already has.

pub mod apply;
pub mod config;
pub mod entries;
pub mod error;
pub mod merge;
pub mod migration;
pub mod paths;
pub mod source;
pub mod summary;

pub use apply::{Applier, ApplyResult, LivenessProbe, PgrepProbe};
pub use config::{ConfigError, Settings};
pub use entries::{build_entries, CandidateEntries};
pub use error::{LoadWarning, MigrationError};
pub use merge::{merge, MergeOutcome, MergeStats};
pub use migration::{
    execute, load_target, plan_migration, Execution, MigrationPlan, MigrationRequest, WriteMode,
    WriteOutcome,
};
pub use source::{collect_sources, LoadedSources, SourceData, SourceLoader};
pub use summary::{render_human, MigrationReport, Mode};

pub use sw2almond_classifier::{classify, Category, Classifier, ClassifierConfig};
pub use sw2almond_format::{Dictionary, DictionaryEntry, ReplacementRule, SettingsDocument};
