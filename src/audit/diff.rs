//! Diff generation for audit logging

use serde_json::Value;

/// Describe top-level field changes between two JSON objects
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return (before != after)
            .then(|| format!("{} -> {}", format_value(before), format_value(after)));
    };

    let mut changes: Vec<String> = before_obj
        .iter()
        .filter_map(|(key, before_val)| match after_obj.get(key) {
            Some(after_val) if after_val != before_val => Some(format!(
                "{}: {} -> {}",
                key,
                format_value(before_val),
                format_value(after_val)
            )),
            Some(_) => None,
            None => Some(format!("{}: {} -> (removed)", key, format_value(before_val))),
        })
        .collect();

    changes.extend(
        after_obj
            .iter()
            .filter(|(key, _)| !before_obj.contains_key(*key))
            .map(|(key, val)| format!("{}: (added) -> {}", key, format_value(val))),
    );

    (!changes.is_empty()).then(|| changes.join(", "))
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields() {
        let before = json!({"item_name": "Oil", "price": 1000, "work_group": ""});
        let after = json!({"item_name": "Oil", "price": 1500, "work_group": "Engine"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("price: 1000 -> 1500"));
        assert!(diff.contains("work_group: \"\" -> \"Engine\""));
        assert!(!diff.contains("item_name"));
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"price": 1000});
        assert_eq!(generate_diff(&value, &value), None);
    }

    #[test]
    fn test_added_and_removed() {
        let before = json!({"equipment_ref": "INV-7"});
        let after = json!({"quantity": 2});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("equipment_ref: \"INV-7\" -> (removed)"));
        assert!(diff.contains("quantity: (added) -> 2"));
    }

    #[test]
    fn test_long_cyrillic_string_truncated_on_char_boundary() {
        let long = "Замена".repeat(20);
        let diff = generate_diff(&json!({"n": long}), &json!({"n": "x"})).unwrap();
        assert!(diff.contains("...\""));
    }
}
