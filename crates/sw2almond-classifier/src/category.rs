//! Classification result types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a replacement rule is, for migration purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Spelling correction: `with` is the canonical text, `original` a variant.
    Spelling,
    /// Text expansion of personal data or a URL.
    Macro,
    /// Slash command that triggers an application action.
    Command,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Spelling, Category::Macro, Category::Command];

    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Spelling => "spelling",
            Category::Macro => "macro",
            Category::Command => "command",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category tally of a batch of rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub spelling: usize,
    #[serde(rename = "macro")]
    pub macro_: usize,
    pub command: usize,
}

impl CategoryCounts {
    pub fn record(&mut self, category: Category) {
        match category {
            Category::Spelling => self.spelling += 1,
            Category::Macro => self.macro_ += 1,
            Category::Command => self.command += 1,
        }
    }

    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Spelling => self.spelling,
            Category::Macro => self.macro_,
            Category::Command => self.command,
        }
    }

    pub fn total(&self) -> usize {
        self.spelling + self.macro_ + self.command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serialization() {
        assert_eq!(serde_json::to_string(&Category::Macro).unwrap(), "\"macro\"");
        let parsed: Category = serde_json::from_str("\"command\"").unwrap();
        assert_eq!(parsed, Category::Command);
    }

    #[test]
    fn test_display_matches_as_str() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }

    #[test]
    fn test_counts() {
        let mut counts = CategoryCounts::default();
        counts.record(Category::Spelling);
        counts.record(Category::Spelling);
        counts.record(Category::Command);
        assert_eq!(counts.get(Category::Spelling), 2);
        assert_eq!(counts.get(Category::Macro), 0);
        assert_eq!(counts.total(), 3);

        let json = serde_json::to_string(&counts).unwrap();
        assert!(json.contains("\"macro\":0"));
    }
}
