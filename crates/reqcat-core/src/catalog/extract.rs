//! Locating collections and fields inside loosely shaped JSON payloads.
//!
//! Backends wrap their lists inconsistently: some endpoints return a bare
//! array, others nest it under a type-specific name or under `data`. The
//! lookup is an ordered list of [`Extractor`] strategies; the first one that
//! yields an array wins.

use serde_json::{Map, Value};

/// One way of finding the array inside a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extractor {
    /// An array stored under the given field of an object payload.
    Container(&'static str),
    /// An array stored under the generic `data` field.
    Data,
    /// The payload itself is the array.
    BareArray,
}

impl Extractor {
    /// Apply this strategy to a payload.
    pub fn extract<'a>(&self, payload: &'a Value) -> Option<&'a Vec<Value>> {
        match self {
            Extractor::Container(name) => payload.get(*name).and_then(Value::as_array),
            Extractor::Data => payload.get("data").and_then(Value::as_array),
            Extractor::BareArray => payload.as_array(),
        }
    }

    /// Name used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            Extractor::Container(name) => *name,
            Extractor::Data => "data",
            Extractor::BareArray => "<array>",
        }
    }
}

/// Build the standard strategy order: containers, then `data`, then the bare array.
pub fn strategies(containers: &[&'static str]) -> Vec<Extractor> {
    containers
        .iter()
        .copied()
        .map(Extractor::Container)
        .chain([Extractor::Data, Extractor::BareArray])
        .collect()
}

/// Run the strategies in order and return the first array found.
pub fn locate<'a>(payload: &'a Value, strategies: &[Extractor]) -> Option<&'a Vec<Value>> {
    strategies.iter().find_map(|s| s.extract(payload))
}

/// First field among `names` holding a usable identifier.
///
/// Numbers and non-blank strings qualify; the result is always a string.
pub fn id_field(item: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| item.get(*name).and_then(id_string))
}

/// Render a scalar JSON value as an identifier string.
pub fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// First field among `names` holding a string.
pub fn str_field<'a>(item: &'a Map<String, Value>, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| item.get(*name).and_then(Value::as_str))
}

/// First field among `names` holding an integer or an integer-valued string.
pub fn int_field(item: &Map<String, Value>, names: &[&str]) -> Option<i64> {
    names.iter().find_map(|name| match item.get(*name)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strategy_order() {
        let s = strategies(&["prioridades"]);
        assert_eq!(
            s,
            vec![
                Extractor::Container("prioridades"),
                Extractor::Data,
                Extractor::BareArray
            ]
        );
    }

    #[test]
    fn test_container_wins_over_data() {
        let payload = json!({ "prioridades": [1], "data": [1, 2] });
        let found = locate(&payload, &strategies(&["prioridades"])).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_non_array_container_falls_through() {
        let payload = json!({ "prioridades": { "nested": true }, "data": [1, 2] });
        let found = locate(&payload, &strategies(&["prioridades"])).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_nothing_found() {
        assert!(locate(&json!({ "items": [] }), &strategies(&[])).is_none());
        assert!(locate(&json!("text"), &strategies(&[])).is_none());
        assert!(locate(&Value::Null, &strategies(&["x"])).is_none());
    }

    #[test]
    fn test_id_field_priority() {
        let item = json!({ "id": 9, "prioridad_id": 5 });
        let item = item.as_object().unwrap();
        assert_eq!(id_field(item, &["prioridad_id", "id"]), Some("5".to_string()));
        assert_eq!(id_field(item, &["estado_id", "id"]), Some("9".to_string()));
    }

    #[test]
    fn test_blank_and_null_ids_skipped() {
        let item = json!({ "prioridad_id": "  ", "estado_id": null, "id": "7" });
        let item = item.as_object().unwrap();
        assert_eq!(
            id_field(item, &["prioridad_id", "estado_id", "id"]),
            Some("7".to_string())
        );
    }

    #[test]
    fn test_int_field_accepts_numeric_strings() {
        let item = json!({ "nivel": "3", "level": 4 });
        let item = item.as_object().unwrap();
        assert_eq!(int_field(item, &["nivel", "level"]), Some(3));
        assert_eq!(int_field(item, &["missing"]), None);
    }
}
