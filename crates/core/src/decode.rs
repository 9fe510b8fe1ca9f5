//! Lenient readers for free-form stored payloads.
//!
//! Stored section content is arbitrary JSON. These helpers pull individual
//! fields out of it without ever failing, so callers can merge field by
//! field over their own defaults.

use serde_json::{Map, Value};

/// Borrow `raw` as a JSON object, or `None` for absent / non-object payloads.
pub(crate) fn as_object(raw: Option<&Value>) -> Option<&Map<String, Value>> {
    raw.and_then(Value::as_object)
}

/// Read `key` from `obj` if it holds a JSON string.
pub(crate) fn string_field(obj: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    obj?.get(key)?.as_str().map(str::to_owned)
}

/// JavaScript-style truthiness.
///
/// `null`, `false`, `0`, `NaN` and `""` are falsy; every other value,
/// including the string `"false"`, arrays and objects, is truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&v), "{v} should be falsy");
        }
    }

    #[test]
    fn truthy_values() {
        for v in [json!(true), json!(1), json!(-2.5), json!("false"), json!([]), json!({})] {
            assert!(is_truthy(&v), "{v} should be truthy");
        }
    }

    #[test]
    fn string_field_ignores_non_strings() {
        let raw = json!({ "title": 42, "subtitle": "ok" });
        let obj = as_object(Some(&raw));
        assert_eq!(string_field(obj, "title"), None);
        assert_eq!(string_field(obj, "subtitle").as_deref(), Some("ok"));
        assert_eq!(string_field(obj, "missing"), None);
    }

    #[test]
    fn as_object_rejects_non_objects() {
        assert!(as_object(None).is_none());
        assert!(as_object(Some(&json!([1, 2]))).is_none());
        assert!(as_object(Some(&json!("hero"))).is_none());
    }
}
