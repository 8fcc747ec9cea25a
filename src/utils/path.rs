use serde_json::Value;

/// Resolves `path` against a JSON value.
///
/// A path without `.` is a plain key lookup. A dotted path walks one segment
/// at a time; a missing key, a `null` or a non-object on the way yields `None`.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if !path.contains('.') {
        return value.get(path).filter(|v| !v.is_null());
    }

    path.split('.')
        .try_fold(value, |current, segment| current.get(segment))
        .filter(|v| !v.is_null())
}

/// Text shown for a resolved value when no custom renderer is present.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_key() {
        let record = json!({ "id": 7, "userName": "johndoe" });
        assert_eq!(lookup(&record, "userName"), Some(&json!("johndoe")));
        assert_eq!(lookup(&record, "missing"), None);
    }

    #[test]
    fn test_dotted_path() {
        let record = json!({ "userDetails": { "email": "john@example.com" } });
        assert_eq!(
            lookup(&record, "userDetails.email"),
            Some(&json!("john@example.com"))
        );
    }

    #[test]
    fn test_missing_intermediate_yields_none() {
        let record = json!({ "id": 1, "userName": "janesmith" });
        assert_eq!(lookup(&record, "userDetails.email"), None);
        assert_eq!(lookup(&record, "role.roleName"), None);

        let null_details = json!({ "userDetails": null });
        assert_eq!(lookup(&null_details, "userDetails.firstName"), None);

        let scalar_details = json!({ "userDetails": "n/a" });
        assert_eq!(lookup(&scalar_details, "userDetails.firstName"), None);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(None), "");
        assert_eq!(display_value(Some(&json!(12))), "12");
        assert_eq!(display_value(Some(&json!("Home"))), "Home");
        assert_eq!(display_value(Some(&json!(2.5))), "2.5");
    }
}
