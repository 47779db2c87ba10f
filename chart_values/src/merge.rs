//! Deep merge of values documents.

use serde_json::{Map, Value};

/// Fold `layer` into `target`.
///
/// Two documents combine key by key, recursing wherever both sides hold a
/// document. Any other pairing is settled in favour of `layer`: scalars,
/// sequences and documents simply take the slot, so a list supplied later
/// never concatenates with an earlier one.
///
/// # Examples
///
/// ```rust
/// use chart_values::merge_value;
/// use serde_json::json;
///
/// let mut chart = json!({"image": {"repository": "nginx"}, "ports": [80]});
/// merge_value(&mut chart, json!({"image": {"tag": "1.25"}, "ports": [443]}));
/// assert_eq!(
///     chart,
///     json!({"image": {"repository": "nginx", "tag": "1.25"}, "ports": [443]}),
/// );
/// ```
pub fn merge_value(target: &mut Value, layer: Value) {
    match (target, layer) {
        (Value::Object(existing), Value::Object(overlay)) => merge_maps(existing, overlay),
        (slot, replacement) => *slot = replacement,
    }
}

/// Fold every key of `layer` into `target`.
///
/// Keys missing from `target` are inserted as they are; shared keys go
/// through [`merge_value`].
///
/// # Examples
///
/// ```rust
/// use chart_values::merge_maps;
/// use serde_json::{json, Value};
///
/// let Value::Object(mut base) = json!({"a": {"x": 1}}) else { unreachable!() };
/// let Value::Object(layer) = json!({"a": 5}) else { unreachable!() };
/// merge_maps(&mut base, layer);
/// assert_eq!(Value::Object(base), json!({"a": 5}));
/// ```
pub fn merge_maps(target: &mut Map<String, Value>, layer: Map<String, Value>) {
    for (key, value) in layer {
        if let Some(existing) = target.get_mut(&key) {
            merge_value(existing, value);
        } else {
            target.insert(key, value);
        }
    }
}
