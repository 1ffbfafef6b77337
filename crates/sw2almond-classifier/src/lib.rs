//! Ordered classifier for SuperWhisper replacement rules.
//!
//! Each rule is sorted into exactly one [`Category`] by evaluating a fixed
//! list of predicates in priority order; the first match wins and anything
//! unmatched is a spelling correction.

mod category;
mod config;

pub use category::{Category, CategoryCounts};
pub use config::ClassifierConfig;

/// Built-in phrases that mark a rule as a personal-data macro.
pub const MACRO_TRIGGERS: &[&str] = &[
    "input my",
    "my email",
    "my address",
    "my phone",
    "my zip",
    "my name",
    "deployment on",
];

/// Expansion is a slash command. Checked on the untrimmed text.
fn is_command(_original: &str, with: &str, _triggers: &[String]) -> bool {
    with.starts_with('/')
}

/// Original contains a trigger phrase, or expansion looks like a URL.
fn is_macro(original: &str, with: &str, triggers: &[String]) -> bool {
    let original = original.to_lowercase();
    let triggered = MACRO_TRIGGERS.iter().any(|t| original.contains(t))
        || triggers.iter().any(|t| original.contains(t.as_str()));
    triggered || with.contains("://") || with.starts_with("http")
}

type Predicate = fn(&str, &str, &[String]) -> bool;

/// Priority order. Spelling is the fallthrough.
const RULES: &[(Category, Predicate)] = &[
    (Category::Command, is_command),
    (Category::Macro, is_macro),
];

/// Classify with the built-in trigger set only.
pub fn classify(original: &str, with: &str) -> Category {
    classify_with(original, with, &[])
}

fn classify_with(original: &str, with: &str, extra_triggers: &[String]) -> Category {
    RULES
        .iter()
        .find(|(_, matches)| matches(original, with, extra_triggers))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Spelling)
}

/// Classifier carrying any configured extra trigger phrases.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    extra_triggers: Vec<String>,
}

impl Classifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            extra_triggers: config.normalized_triggers(),
        }
    }

    /// Classify one `(original, with)` rule.
    pub fn classify(&self, original: &str, with: &str) -> Category {
        classify_with(original, with, &self.extra_triggers)
    }
}
