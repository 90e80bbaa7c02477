//! Response envelope normalization.
//!
//! Strapi v4 wraps every entity as `{ "id": 1, "attributes": { ... } }` and
//! every relation or media field as `{ "data": ... }`. Strapi v5 returns flat
//! entities with a `documentId`. Normalizing both to the flat shape lets the
//! typed models stay simple.

use serde_json::{Map, Value};

pub fn normalize(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Value::Object(map) => normalize_object(map),
        other => other,
    }
}

fn normalize_object(mut map: Map<String, Value>) -> Value {
    if is_data_wrapper(&map) {
        return map.remove("data").map(normalize).unwrap_or(Value::Null);
    }

    if let Some(Value::Object(attributes)) = map.remove("attributes") {
        let mut flat = attributes;
        for key in ["id", "documentId"] {
            if let Some(value) = map.remove(key) {
                flat.entry(key.to_string()).or_insert(value);
            }
        }
        return normalize_object(flat);
    }

    Value::Object(
        map.into_iter()
            .map(|(key, value)| (key, normalize(value)))
            .collect(),
    )
}

/// `{ "data": ... }` or `{ "data": ..., "meta": ... }`.
fn is_data_wrapper(map: &Map<String, Value>) -> bool {
    map.contains_key("data") && map.keys().all(|key| key == "data" || key == "meta")
}
