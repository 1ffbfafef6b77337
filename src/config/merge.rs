//! Layer overlay
//!
//! `Settings` is a flat table, so every layer replaces values key by key.
//! Arrays such as `extra_macro_triggers` are replaced, never concatenated,
//! and a `null` clears a path that a lower layer set.

use serde_json::{Map, Value};

use super::ConfigError;

/// Overlay one layer onto the settings accumulated so far.
///
/// `origin` names the layer in error messages.
pub fn overlay(base: &mut Map<String, Value>, layer: Value, origin: &str) -> Result<(), ConfigError> {
    let layer = match layer {
        Value::Object(map) => map,
        Value::Null => return Ok(()),
        other => {
            return Err(ConfigError::Invalid(format!(
                "{origin}: expected a table of settings, found {other}"
            )))
        }
    };

    for (key, value) in layer {
        if value.is_object() {
            return Err(ConfigError::Invalid(format!(
                "{origin}: `{key}` must be a plain value, not a table"
            )));
        }
        tracing::trace!(key = %key, origin, "config value set");
        base.insert(key, value);
    }
    Ok(())
}

/// Overlay `(origin, layer)` pairs in order, lowest precedence first.
pub fn merge_layers(layers: Vec<(String, Value)>) -> Result<Value, ConfigError> {
    let mut merged = Map::new();
    for (origin, layer) in layers {
        overlay(&mut merged, layer, &origin)?;
    }
    Ok(Value::Object(merged))
}
