use alloc::{string::String, vec, vec::Vec};

use crate::Serializer;

/// Drains `ser` with a fixed buffer size, asserting the bounded-write
/// contract on every call.
pub fn drain(ser: &mut Serializer<'_>, size: usize) -> Vec<u8> {
    assert!(size > 0);
    let mut buf = vec![0u8; size];
    let mut out = Vec::new();
    while !ser.done() {
        let filled = ser.read(&mut buf);
        assert!(filled.len() <= size);
        out.extend_from_slice(filled);
    }
    out
}

/// Drains with a repeating schedule of buffer sizes.
pub fn drain_with_sizes(ser: &mut Serializer<'_>, sizes: &[usize]) -> Vec<u8> {
    assert!(!sizes.is_empty());
    let mut out = Vec::new();
    let mut turn = 0;
    while !ser.done() {
        let size = sizes[turn % sizes.len()].max(1);
        let mut buf = vec![0u8; size];
        let filled = ser.read(&mut buf);
        assert!(filled.len() <= size);
        out.extend_from_slice(filled);
        turn += 1;
    }
    out
}

pub fn drain_to_string(ser: &mut Serializer<'_>, size: usize) -> String {
    String::from_utf8(drain(ser, size)).expect("serializer output is valid UTF-8")
}
