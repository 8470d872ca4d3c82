//! Benchmark – `jsonspool::Serializer`.
#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jsonspool::{Map, Serializer, Value};

/// Produce a deterministic document whose rendering is roughly
/// `target_len` bytes: an object holding one long string (the bulk-copy
/// fast path) and an array of numbers (the scalar staging path).
fn make_document(target_len: usize) -> Value {
    let text_len = target_len / 2;
    let mut text = String::with_capacity(text_len);
    for i in 0..text_len {
        // Mostly clean ASCII with a periodic escape to keep the slow path
        // honest.
        text.push(if i % 61 == 0 { '\n' } else { 'a' });
    }

    let mut numbers = Vec::new();
    let mut i = 0usize;
    let mut remaining = target_len - text_len;
    while remaining > 0 {
        let v = (i as i64).wrapping_mul(-987_654_321);
        numbers.push(Value::Int(v));
        remaining = remaining.saturating_sub(12);
        i += 1;
    }

    let mut map = Map::new();
    map.insert("data", text);
    map.insert("numbers", Value::Array(numbers));
    Value::Object(map)
}

/// Drains the document through `chunk`-byte buffers and returns the total
/// byte count so Criterion can black-box the work.
fn run_chunked(value: &Value, chunk: usize) -> usize {
    let mut ser = Serializer::new();
    ser.reset(value);
    let mut buf = vec![0u8; chunk];
    let mut total = 0;
    while !ser.done() {
        total += ser.read(&mut buf).len();
    }
    total
}

fn bench_serializer(c: &mut Criterion) {
    let value = make_document(10_000);
    let total = run_chunked(&value, 1 << 16);

    let mut group = c.benchmark_group("serializer_chunked");
    group.throughput(Throughput::Bytes(total as u64));
    for &chunk in &[16usize, 256, 4_096, 65_536] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            b.iter(|| black_box(run_chunked(black_box(&value), chunk)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_serializer);
criterion_main!(benches);
