use serde_json::Value;

/// Placeholder for absent values and empty sets in table output
pub const EMPTY_CELL: &str = "-";

/// Render a stored attribute as a single table cell.
///
/// Sets and lists are joined with commas; absent values and empty
/// collections render as [`EMPTY_CELL`] so they stand out from `false`.
pub fn value_to_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => EMPTY_CELL.to_string(),
        Some(Value::Array(arr)) if arr.is_empty() => EMPTY_CELL.to_string(),
        Some(v) => value_to_short_string(v),
    }
}

/// Convert a JSON value to a short string representation
pub fn value_to_short_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(arr) => arr
            .iter()
            .map(value_to_short_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(obj) => obj
            .iter()
            .map(|(key, val)| format!("{}={}", key, value_to_short_string(val)))
            .collect::<Vec<_>>()
            .join(" "),
        Value::Null => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(value_to_short_string(&json!("nyc3")), "nyc3");
        assert_eq!(value_to_short_string(&json!(0.00744)), "0.00744");
        assert_eq!(value_to_short_string(&json!(true)), "true");
        assert_eq!(value_to_short_string(&json!(null)), "");
    }

    #[test]
    fn test_sets_join_with_commas() {
        assert_eq!(value_to_short_string(&json!(["env:prod", "web"])), "env:prod, web");
        assert_eq!(value_to_short_string(&json!(["a", null, "b"])), "a, b");
    }

    #[test]
    fn test_objects_render_as_pairs() {
        assert_eq!(value_to_short_string(&json!({"email": "ops@example.com", "status": "active"})), "email=ops@example.com status=active");
    }

    #[test]
    fn test_cells_mark_absent_and_empty() {
        assert_eq!(value_to_cell(None), EMPTY_CELL);
        assert_eq!(value_to_cell(Some(&json!(null))), EMPTY_CELL);
        assert_eq!(value_to_cell(Some(&json!([]))), EMPTY_CELL);
        assert_eq!(value_to_cell(Some(&json!(false))), "false");
        assert_eq!(value_to_cell(Some(&json!(["vol-a", "vol-b"]))), "vol-a, vol-b");
    }
}
