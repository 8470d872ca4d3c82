#![allow(dead_code)]

use jsonspool::{Map, Value};

/// Small all-ASCII document whose 35-byte rendering is convenient for
/// chunk-boundary snapshots.
pub fn small_fixture() -> Value {
    let mut map = Map::new();
    map.insert("id", 7i64);
    map.insert(
        "tags",
        Value::Array(vec![Value::from("a"), Value::from("b")]),
    );
    map.insert("ok", true);
    Value::Object(map)
}

/// Larger document with every value kind. Keys are inserted in sorted
/// order so the rendering can be compared against serde_json's
/// BTreeMap-backed output.
pub fn document_fixture() -> Value {
    let mut flags = Map::new();
    flags.insert("empty", false);
    flags.insert("ready", true);

    let mut range = Map::new();
    range.insert("max", u64::MAX);
    range.insert("min", i64::MIN);

    let mut map = Map::new();
    map.insert(
        "counts",
        Value::Array(vec![
            Value::Int(0),
            Value::Int(-7),
            Value::UInt(9_007_199_254_740_993),
            Value::Float(2.5),
        ]),
    );
    map.insert("flags", Value::Object(flags));
    map.insert("name", "chunked\nserializer \u{2714} \u{e9}");
    map.insert("none", Value::Null);
    map.insert("pi", core::f64::consts::PI);
    map.insert("range", Value::Object(range));
    Value::Object(map)
}

/// The same document expressed in the serde_json model.
pub fn document_as_serde() -> serde_json::Value {
    serde_json::json!({
        "counts": [0, -7, 9_007_199_254_740_993u64, 2.5],
        "flags": { "empty": false, "ready": true },
        "name": "chunked\nserializer \u{2714} \u{e9}",
        "none": null,
        "pi": core::f64::consts::PI,
        "range": { "max": u64::MAX, "min": i64::MIN },
    })
}
