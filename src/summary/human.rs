//! Human-readable migration summary.

use sw2almond_classifier::Category;

use crate::migration::MigrationPlan;

/// Whether the run wrote anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    DryRun,
    Applied,
}

const RULE: &str = "============================================================";

fn category_label(category: Category) -> &'static str {
    match category {
        Category::Spelling => "Spelling corrections:",
        Category::Macro => "Text macros:         ",
        Category::Command => "Slash commands:      ",
    }
}

/// Render the summary printed after a run.
pub fn render_human(plan: &MigrationPlan, mode: Mode) -> String {
    let mut out = String::new();
    let stats = plan.outcome.stats;

    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    out.push_str("  SuperWhisper -> Almond Migration Summary\n");
    out.push_str(RULE);
    out.push('\n');
    out.push('\n');

    out.push_str(&format!("  SuperWhisper vocabulary terms: {}\n", plan.source.vocabulary.len()));
    out.push_str(&format!("  SuperWhisper replacements:     {}\n", plan.source.replacements.len()));
    for category in Category::ALL {
        let count = plan.category_counts.get(category);
        if count == 0 {
            continue;
        }
        let suffix = if category == Category::Command { " (skipped)" } else { "" };
        out.push_str(&format!("    - {} {}{}\n", category_label(category), count, suffix));
    }
    out.push('\n');

    out.push_str(&format!("  New Almond entries to add:     {}\n", stats.added));
    out.push_str(&format!("  Variants merged into existing: {}\n", stats.merged_variants));
    out.push_str(&format!("  Already in Almond (skipped):   {}\n", stats.skipped));
    out.push('\n');

    if stats.added > 0 {
        let mut added: Vec<_> = plan
            .outcome
            .added_keys
            .iter()
            .filter_map(|key| plan.candidates.get(key))
            .collect();
        added.sort_by_key(|entry| entry.canonical.to_lowercase());

        out.push_str("  New entries:\n");
        for entry in added {
            if entry.variants.is_empty() {
                out.push_str(&format!("    + {}\n", entry.canonical));
            } else {
                out.push_str(&format!(
                    "    + {} (variants: {})\n",
                    entry.canonical,
                    entry.variants.join(", ")
                ));
            }
        }
        out.push('\n');
    }

    match mode {
        Mode::DryRun => {
            out.push_str("  Mode: DRY RUN (no changes made)\n");
            out.push_str("  Run with --apply to write changes\n");
        }
        Mode::Applied => {
            out.push_str("  Mode: APPLIED\n");
        }
    }

    out.push('\n');
    out.push_str(RULE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::plan_migration;
    use crate::source::{LoadedSources, SourceData};
    use sw2almond_classifier::Classifier;
    use sw2almond_format::{Dictionary, DictionaryEntry, ReplacementRule};

    fn plan(existing: &Dictionary) -> MigrationPlan {
        let loaded = LoadedSources {
            data: SourceData {
                vocabulary: vec!["zeta".to_string(), "Alpha".to_string()],
                replacements: vec![
                    ReplacementRule::new("reink", "Re-Ink"),
                    ReplacementRule::new("open app", "/launch app"),
                ],
            },
            ..Default::default()
        };
        plan_migration(loaded, existing, &Classifier::default(), false)
    }

    #[test]
    fn test_dry_run_summary() {
        let text = render_human(&plan(&Dictionary::empty()), Mode::DryRun);

        assert!(text.contains("SuperWhisper vocabulary terms: 2"));
        assert!(text.contains("SuperWhisper replacements:     2"));
        assert!(text.contains("Spelling corrections: 1"));
        assert!(text.contains("Slash commands:       1 (skipped)"));
        assert!(!text.contains("Text macros"));
        assert!(text.contains("New Almond entries to add:     3"));
        assert!(text.contains("+ Re-Ink (variants: reink)"));
        assert!(text.contains("Mode: DRY RUN"));
    }

    #[test]
    fn test_new_entries_sorted_case_insensitively() {
        let text = render_human(&plan(&Dictionary::empty()), Mode::DryRun);
        let alpha = text.find("+ Alpha").unwrap();
        let reink = text.find("+ Re-Ink").unwrap();
        let zeta = text.find("+ zeta").unwrap();
        assert!(alpha < reink && reink < zeta);
    }

    #[test]
    fn test_existing_keys_not_listed() {
        let mut existing = Dictionary::empty();
        existing
            .entries
            .insert("zeta".to_string(), DictionaryEntry::new("Zeta"));

        let text = render_human(&plan(&existing), Mode::Applied);
        assert!(!text.contains("+ zeta"));
        assert!(text.contains("Already in Almond (skipped):   1"));
        assert!(text.contains("Mode: APPLIED"));
    }

    #[test]
    fn test_summary_is_framed_by_rules() {
        let text = render_human(&plan(&Dictionary::empty()), Mode::DryRun);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], RULE);
        assert_eq!(lines[2], "  SuperWhisper -> Almond Migration Summary");
        assert_eq!(lines[3], RULE);
        assert_eq!(lines.last(), Some(&RULE));
        assert!(!text.ends_with('\n'));
        assert!(lines.contains(&"  Run with --apply to write changes"));
    }
}
