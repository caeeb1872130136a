//! Helpers over the schema-free value bag.
//!
//! The bag is plain JSON. Lookups never mutate it; a fill pass only reads.

use serde_json::{Map, Value};

/// Semantic value bag: field identifier to scalar, nested bag or array.
pub type ValueBag = Map<String, Value>;

/// Host-script truthiness: null, `false`, zero and the empty string are falsy.
/// Objects and arrays are always truthy, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// Resolve a dotted path (`homeAddress.street1`) against the bag.
pub fn lookup<'a>(bag: &'a ValueBag, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = bag.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// First truthy value along a fallback chain of paths.
pub fn first_truthy<'a>(bag: &'a ValueBag, paths: &[&str]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|path| lookup(bag, path))
        .find(|value| is_truthy(value))
}

/// Text form of a scalar, as the host page would see it after assignment.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> ValueBag {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn truthiness_matches_host_rules() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(" ")));
        assert!(is_truthy(&json!(3)));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
    }

    #[test]
    fn dotted_lookup_walks_nested_bags() {
        let data = bag(json!({"homeAddress": {"street1": "1 Main St"}, "city": "Osaka"}));
        assert_eq!(lookup(&data, "homeAddress.street1"), Some(&json!("1 Main St")));
        assert_eq!(lookup(&data, "city"), Some(&json!("Osaka")));
        assert_eq!(lookup(&data, "homeAddress.city"), None);
        assert_eq!(lookup(&data, "city.street1"), None);
    }

    #[test]
    fn fallback_chain_skips_falsy_entries() {
        let data = bag(json!({"name_first": "", "atlas_first_name": "Jane"}));
        let found = first_truthy(&data, &["name_first", "atlas_first_name", "firstname"]);
        assert_eq!(found, Some(&json!("Jane")));
        assert_eq!(first_truthy(&data, &["missing"]), None);
    }

    #[test]
    fn numbers_render_without_trailing_fraction() {
        assert_eq!(as_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(as_text(&json!(4.0)).as_deref(), Some("4"));
        assert_eq!(as_text(&json!(1.5)).as_deref(), Some("1.5"));
        assert_eq!(as_text(&json!(true)).as_deref(), Some("true"));
        assert_eq!(as_text(&json!({"a": 1})), None);
    }
}
