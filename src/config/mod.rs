//! Layered configuration
//!
//! Settings are resolved from three layers, lowest precedence first:
//! 1. Built-in defaults
//! 2. User config (`~/.config/sw2almond/config.toml`)
//! 3. CLI flags

mod defaults;
mod merge;

pub use defaults::{BuiltinDefaults, DEFAULT_APP_PROCESS_PATTERN};
pub use merge::{merge_layers, overlay};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use sw2almond_classifier::ClassifierConfig;

/// User config location relative to the home directory.
pub const USER_CONFIG_PATH: &str = ".config/sw2almond/config.toml";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error reading {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// SuperWhisper data directory; auto-detected when unset.
    #[serde(default)]
    pub superwhisper_path: Option<PathBuf>,

    /// Almond dictionary file; auto-detected when unset.
    #[serde(default)]
    pub almond_path: Option<PathBuf>,

    pub include_macros: bool,

    pub scan_backups: bool,

    pub app_process_pattern: String,

    #[serde(default)]
    pub extra_macro_triggers: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let defaults = BuiltinDefaults::default();
        Self {
            superwhisper_path: None,
            almond_path: None,
            include_macros: defaults.include_macros,
            scan_backups: defaults.scan_backups,
            app_process_pattern: defaults.app_process_pattern,
            extra_macro_triggers: Vec::new(),
        }
    }
}

impl Settings {
    /// Resolve settings from all layers.
    ///
    /// An explicit `config_path` must exist. Without one, the user config under
    /// `home` is used if present and silently skipped otherwise.
    pub fn resolve(
        config_path: Option<&Path>,
        home: Option<&Path>,
        cli_overrides: Value,
    ) -> Result<Self, ConfigError> {
        let mut layers = vec![(
            "built-in defaults".to_string(),
            BuiltinDefaults::default().to_value(),
        )];

        let user_file = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => home
                .map(|h| h.join(USER_CONFIG_PATH))
                .filter(|p| p.exists()),
        };

        if let Some(path) = user_file {
            tracing::debug!(path = %path.display(), "loading config file");
            let layer = load_toml_file(&path)?;
            layers.push((path.display().to_string(), layer));
        }

        layers.push(("command line".to_string(), cli_overrides));

        let merged = merge_layers(layers)?;
        let settings: Settings =
            serde_json::from_value(merged).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.app_process_pattern.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "app_process_pattern must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Classifier settings derived from this configuration.
    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            extra_macro_triggers: self.extra_macro_triggers.clone(),
        }
    }
}

/// Load a TOML file as a JSON value for merging
fn load_toml_file(path: &Path) -> Result<Value, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let table: toml::Table = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(toml_to_json(toml::Value::Table(table)))
}

/// Convert TOML Value to JSON Value
fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
