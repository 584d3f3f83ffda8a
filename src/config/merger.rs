//! Deep merge for project configuration files.
//!
//! `.lintstack.local.yml` is layered over `.lintstack.yml` before the result
//! is deserialized. The merge works on raw YAML values.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively
//! - Sequences under an appending key (`fragments`, `type_aware_rules`) are
//!   concatenated, base first
//! - Other sequences are replaced entirely
//! - Null values in overlay delete the corresponding key from base
//! - Scalars in overlay replace scalars in base

use serde_yaml::Value;

/// Keys whose sequences accumulate across layers instead of being replaced.
pub const APPENDING_KEYS: &[&str] = &["fragments", "type_aware_rules"];

/// Deep merge two YAML values; `overlay` takes precedence.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    merge_at(None, base, overlay)
}

fn merge_at(key: Option<&Value>, base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), merge_at(Some(key), base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }

        (Value::Sequence(base_seq), Value::Sequence(overlay_seq)) if is_appending(key) => {
            let mut result = base_seq.clone();
            result.extend(overlay_seq.iter().cloned());
            Value::Sequence(result)
        }

        (_, overlay) => overlay.clone(),
    }
}

fn is_appending(key: Option<&Value>) -> bool {
    key.and_then(Value::as_str)
        .is_some_and(|k| APPENDING_KEYS.contains(&k))
}

/// Merge several values in order (later overrides earlier).
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, config| {
            deep_merge(&acc, config)
        })
}
