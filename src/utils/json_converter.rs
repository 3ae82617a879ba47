use serde_json::Value;

/// Render a JSON value as a table cell: strings unquoted, containers as
/// compact JSON.
pub fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Collect the union of keys across a result set, in first-seen order.
pub fn union_keys(items: &[Value]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for item in items {
        if let Some(obj) = item.as_object() {
            for key in obj.keys() {
                if !keys.iter().any(|k| k == key) {
                    keys.push(key.clone());
                }
            }
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cells() {
        assert_eq!(value_to_cell(&json!(null)), "");
        assert_eq!(value_to_cell(&json!("info")), "info");
        assert_eq!(value_to_cell(&json!(3)), "3");
        assert_eq!(value_to_cell(&json!({"a": [1, 2]})), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn keys_are_merged_in_first_seen_order() {
        let items = vec![json!({"b": 1, "a": 2}), json!({"c": 3, "a": 4}), json!(5)];
        assert_eq!(union_keys(&items), vec!["a", "b", "c"]);
    }
}
