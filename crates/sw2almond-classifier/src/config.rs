//! Classifier configuration.

use serde::{Deserialize, Serialize};

/// Extra macro trigger phrases on top of the built-in set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Phrases matched case-insensitively as substrings of `original`.
    #[serde(default)]
    pub extra_macro_triggers: Vec<String>,
}

impl ClassifierConfig {
    /// Lowercased, non-blank extra triggers.
    pub(crate) fn normalized_triggers(&self) -> Vec<String> {
        self.extra_macro_triggers
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClassifierConfig::default();
        assert!(config.extra_macro_triggers.is_empty());
        assert!(config.normalized_triggers().is_empty());
    }

    #[test]
    fn test_blank_triggers_are_dropped() {
        let config = ClassifierConfig {
            extra_macro_triggers: vec!["  My IBAN ".to_string(), "   ".to_string()],
        };
        assert_eq!(config.normalized_triggers(), vec!["my iban"]);
    }
}
