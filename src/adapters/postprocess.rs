//! Caller-side post-processing applied after a fill.

use serde_json::Value;

/// Force every non-empty list in an object tree to `count` copies of its
/// first element.
///
/// This is minimal replication, not independent re-generation: nested arrays
/// repeat their first generated element. Callers wanting unique items should
/// fill a list-shaped skeleton once per item instead.
pub fn replicate_list_lengths(value: &Value, count: usize) -> Value {
    match value {
        Value::Array(items) if !items.is_empty() => {
            Value::Array(vec![items[0].clone(); count])
        }
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| (key.clone(), replicate_list_lengths(child, count)))
                .collect(),
        ),
        other => other.clone(),
    }
}
