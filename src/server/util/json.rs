//! Helpers for the schema-less JSON columns.

use serde_json::{Map, Value};

/// Reads a JSON array column as a list of strings, skipping non-string elements.
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Stores a list of strings as a JSON array column.
pub fn to_json_list(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

/// Returns the object map of a JSON value, or an empty map for any other shape.
pub fn object_or_empty(value: Option<&Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_list_skips_other_types() {
        let value = json!(["yoga", 3, null, "run"]);

        assert_eq!(string_list(&value), vec!["yoga", "run"]);
        assert!(string_list(&json!({"a": 1})).is_empty());
    }

    #[test]
    fn object_or_empty_ignores_non_objects() {
        assert!(object_or_empty(Some(&json!([1]))).is_empty());
        assert_eq!(object_or_empty(Some(&json!({"a": 1}))).len(), 1);
        assert!(object_or_empty(None).is_empty());
    }
}
