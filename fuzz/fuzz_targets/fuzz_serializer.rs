#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use jsonspool::{Map, Serializer, Value};
use libfuzzer_sys::fuzz_target;

#[derive(Debug)]
struct ArbitraryValue(Value);

fn gen_value(u: &mut Unstructured<'_>, depth: usize) -> arbitrary::Result<Value> {
    let kinds = if depth == 0 { 6 } else { 8 };
    Ok(match u.choose_index(kinds)? {
        0 => Value::Null,
        1 => Value::Bool(u.arbitrary()?),
        2 => Value::Int(u.arbitrary()?),
        3 => Value::UInt(u.arbitrary()?),
        4 => Value::Float(u.arbitrary()?),
        5 => Value::String(u.arbitrary()?),
        6 => {
            let len = u.choose_index(4)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(gen_value(u, depth - 1)?);
            }
            Value::Array(items)
        }
        _ => {
            let len = u.choose_index(4)?;
            let mut map = Map::new();
            for _ in 0..len {
                map.insert(u.arbitrary::<String>()?, gen_value(u, depth - 1)?);
            }
            Value::Object(map)
        }
    })
}

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self(gen_value(u, 3)?))
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    value: ArbitraryValue,
    sizes: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let Input { value, sizes } = input;
    let value = value.0;

    let single = jsonspool::to_vec(&value);

    let mut ser = Serializer::new();
    ser.reset(&value);
    let mut chunked = Vec::new();
    let mut turn = 0usize;
    while !ser.done() {
        let size = if sizes.is_empty() {
            7
        } else {
            1 + usize::from(sizes[turn % sizes.len()]) % 64
        };
        let mut buf = vec![0u8; size];
        let filled = ser.read(&mut buf);
        assert!(filled.len() <= size);
        chunked.extend_from_slice(filled);
        turn += 1;
    }
    assert_eq!(chunked, single);

    // ryu spells non-finite doubles in a way JSON parsers reject, so the
    // parse oracle only applies to finite documents.
    if is_finite(&value) {
        serde_json::from_slice::<serde_json::Value>(&single)
            .expect("finite documents serialize to valid JSON");
    }
});

fn is_finite(value: &Value) -> bool {
    match value {
        Value::Float(v) => v.is_finite(),
        Value::Array(items) => items.iter().all(is_finite),
        Value::Object(map) => map.iter().all(|(_, v)| is_finite(v)),
        _ => true,
    }
}
