//! Deep merge for configuration overlays.
//!
//! Overlay leaf values win over base values at every nesting depth.
//! Arrays are replaced entirely, not concatenated. An overlay only adds
//! or replaces keys, never removes them, so every leaf of the default
//! tree survives any overlay.

use serde_json::Value;

/// Deep merge two JSON values, with `overlay` taking precedence over `base`.
///
/// - Objects are merged recursively: keys in overlay override keys in base
/// - Arrays, strings, numbers, booleans are replaced entirely
/// - If overlay is null, the base value is preserved (null means "not specified")
///
/// # Example
/// ```
/// use serde_json::json;
/// use iamus_config::config::deep_merge;
///
/// let defaults = json!({
///     "server": { "listen-port": 9400, "listen-host": "0.0.0.0" }
/// });
/// let override_file = json!({
///     "server": { "listen-port": 9500 }
/// });
/// let result = deep_merge(defaults, override_file);
/// // Result: { "server": { "listen-port": 9500, "listen-host": "0.0.0.0" } }
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        // Both are objects: merge recursively
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged_value = if let Some(base_value) = base_map.remove(&key) {
                    deep_merge(base_value, overlay_value)
                } else {
                    overlay_value
                };
                base_map.insert(key, merged_value);
            }
            Value::Object(base_map)
        }
        // Overlay is null: preserve base (null means "not specified")
        (base, Value::Null) => base,
        // Any other case: overlay replaces base entirely
        (_, overlay) => overlay,
    }
}

/// Merge multiple values in order, with later values taking precedence.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values.into_iter().fold(Value::Null, deep_merge)
}
