//! Built-in defaults (layer 1)

use serde::{Deserialize, Serialize};

/// Process name pattern probed before writing to Almond's dictionary.
pub const DEFAULT_APP_PROCESS_PATTERN: &str = "Almond.app";

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Migrate personal-data and URL macros (default: false)
    pub include_macros: bool,

    /// Read `settings.backup.*.json` snapshots too (default: false)
    pub scan_backups: bool,

    /// Pattern passed to `pgrep -f` (default: "Almond.app")
    pub app_process_pattern: String,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            include_macros: false,
            scan_backups: false,
            app_process_pattern: DEFAULT_APP_PROCESS_PATTERN.to_string(),
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "include_macros": self.include_macros,
            "scan_backups": self.scan_backups,
            "app_process_pattern": self.app_process_pattern,
            "extra_macro_triggers": [],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let defaults = BuiltinDefaults::default();
        assert!(!defaults.include_macros);
        assert!(!defaults.scan_backups);
        assert_eq!(defaults.app_process_pattern, "Almond.app");
    }

    #[test]
    fn test_to_value() {
        let value = BuiltinDefaults::default().to_value();
        assert_eq!(value["include_macros"], false);
        assert_eq!(value["app_process_pattern"], "Almond.app");
        assert!(value["extra_macro_triggers"].as_array().unwrap().is_empty());
        assert!(value.get("almond_path").is_none());
    }
}
