use alloc::{borrow::ToOwned, vec};

use quickcheck::QuickCheck;

use crate::{to_string, Map, Value};

/// Mirrors a `Value` into the serde_json model so the parsed output can be
/// compared structurally (object ordering aside).
fn to_serde(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(v) => serde_json::Value::from(*v),
        Value::UInt(v) => serde_json::Value::from(*v),
        Value::Float(v) => serde_json::Number::from_f64(*v)
            .map(serde_json::Value::Number)
            .expect("finite doubles only"),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(to_serde).collect()),
        Value::Object(map) => serde_json::Value::Object(
            map.iter().map(|(k, v)| (k.to_owned(), to_serde(v))).collect(),
        ),
    }
}

/// Property: serde_json parses our output back to the same document. The
/// oracle works because serde_json shares the escape policy (lowercase
/// `\u00xx`, the five short escapes, raw pass-through above 0x1f) and the
/// itoa/ryu number renderings.
#[test]
#[allow(clippy::needless_pass_by_value)]
fn serde_json_round_trips_our_output_quickcheck() {
    fn prop(value: Value) -> bool {
        let text = to_string(&value);
        let parsed: serde_json::Value =
            serde_json::from_str(&text).expect("serializer must emit valid JSON");
        parsed == to_serde(&value)
    }

    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Value) -> bool);
}

#[test]
fn known_document_round_trips() {
    let mut inner = Map::new();
    inner.insert("depth", 2i64);
    let mut map = Map::new();
    map.insert("list", Value::Array(vec![Value::Null, Value::Object(inner)]));
    map.insert("text", "tab\there \u{3}");
    let value = Value::Object(map);

    let parsed: serde_json::Value = serde_json::from_str(&to_string(&value)).unwrap();
    assert_eq!(parsed, to_serde(&value));
}
