//! One migration run, from loaded sources to a proposed dictionary and,
//! depending on the write mode, onto disk.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

use sw2almond_classifier::{CategoryCounts, Classifier};
use sw2almond_format::Dictionary;

use crate::apply::{ensure_writer_idle, export, Applier, ApplyResult, LivenessProbe};
use crate::entries::{build_entries, CandidateEntries};
use crate::error::{LoadWarning, MigrationError};
use crate::merge::{merge, MergeOutcome};
use crate::source::{DocumentProvenance, LoadedSources, SourceData, SourceLoader};

/// Everything computed for a run. Nothing here has been written anywhere.
#[derive(Debug, Clone)]
pub struct MigrationPlan {
    pub source: SourceData,
    pub documents: Vec<DocumentProvenance>,
    pub category_counts: CategoryCounts,
    pub candidates: CandidateEntries,
    pub outcome: MergeOutcome,
    pub warnings: Vec<LoadWarning>,
}

/// Load the existing Almond dictionary.
///
/// A missing file is an empty dictionary. A corrupt one is also treated as
/// empty, with a warning.
pub fn load_target(path: &Path) -> (Dictionary, Option<LoadWarning>) {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no existing dictionary");
        return (Dictionary::empty(), None);
    }

    match Dictionary::from_file(path) {
        Ok(dictionary) => {
            tracing::debug!(path = %path.display(), entries = dictionary.len(), "loaded dictionary");
            (dictionary, None)
        }
        Err(e) => {
            let warning = LoadWarning::TargetUnreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            };
            tracing::warn!("{}", warning);
            (Dictionary::empty(), Some(warning))
        }
    }
}

/// Classify, build and merge.
pub fn plan_migration(
    loaded: LoadedSources,
    existing: &Dictionary,
    classifier: &Classifier,
    include_macros: bool,
) -> MigrationPlan {
    let mut category_counts = CategoryCounts::default();
    for rule in &loaded.data.replacements {
        category_counts.record(classifier.classify(&rule.original, &rule.with));
    }

    let candidates = build_entries(&loaded.data, classifier, include_macros);
    let outcome = merge(existing, &candidates);

    MigrationPlan {
        source: loaded.data,
        documents: loaded.documents,
        category_counts,
        candidates,
        outcome,
        warnings: loaded.warnings,
    }
}

/// Where the merged dictionary goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteMode {
    /// Report only.
    DryRun,
    /// Replace Almond's dictionary in place.
    Apply { force: bool },
    /// Write to another file; Almond's dictionary is never touched.
    Export(PathBuf),
}

impl WriteMode {
    /// An export destination wins over `apply`.
    pub fn from_flags(apply: bool, force: bool, export: Option<PathBuf>) -> Self {
        match (export, apply) {
            (Some(destination), _) => Self::Export(destination),
            (None, true) => Self::Apply { force },
            (None, false) => Self::DryRun,
        }
    }
}

/// Inputs for [`execute`].
#[derive(Debug, Clone)]
pub struct MigrationRequest<'a> {
    pub loader: &'a SourceLoader,
    /// Almond's dictionary file.
    pub target: &'a Path,
    pub classifier: &'a Classifier,
    pub include_macros: bool,
    pub mode: WriteMode,
}

/// What happened to the merged dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    DryRun,
    Exported(PathBuf),
    Applied(ApplyResult),
}

/// Result of a full run.
#[derive(Debug, Clone)]
pub enum Execution {
    /// SuperWhisper had no vocabulary and no replacements. Nothing was
    /// planned and nothing was written.
    NothingToMigrate { warnings: Vec<LoadWarning> },
    Completed {
        plan: MigrationPlan,
        write: WriteOutcome,
    },
}

/// Run a migration end to end.
///
/// A missing primary settings file and a live Almond (when applying without
/// force) both fail before any document is parsed. Exports never consult
/// `probe`.
pub fn execute(
    request: &MigrationRequest<'_>,
    probe: &dyn LivenessProbe,
    at: DateTime<Local>,
) -> Result<Execution, MigrationError> {
    let primary = request.loader.primary_path();
    if !primary.exists() {
        return Err(MigrationError::SourceNotFound(primary));
    }

    if let WriteMode::Apply { force } = request.mode {
        ensure_writer_idle(probe, force)?;
    }

    let mut loaded = request.loader.load()?;
    if loaded.data.is_empty() {
        tracing::info!(path = %primary.display(), "no vocabulary or replacements found");
        return Ok(Execution::NothingToMigrate {
            warnings: loaded.warnings,
        });
    }

    let (existing, warning) = load_target(request.target);
    loaded.warnings.extend(warning);

    let plan = plan_migration(loaded, &existing, request.classifier, request.include_macros);

    let write = match &request.mode {
        WriteMode::DryRun => WriteOutcome::DryRun,
        WriteMode::Export(destination) => {
            export(&plan.outcome.dictionary, destination)?;
            WriteOutcome::Exported(destination.clone())
        }
        WriteMode::Apply { force } => WriteOutcome::Applied(
            Applier::new(request.target, probe)
                .force(*force)
                .apply(&plan.outcome, at)?,
        ),
    };

    Ok(Execution::Completed { plan, write })
}
