//! Criterion benchmarks for the wire codec and the typed codec layer.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use wirepack::codec::{self, Codec};
use wirepack::{pack, unpack_exact, Value};

/// A representative nested value: an array of small record-shaped maps.
fn sample_value() -> Value {
    let record = |id: i64, name: &str| {
        Value::Map(vec![
            (Value::string("id"), Value::Integer(id)),
            (Value::string("name"), Value::string(name)),
            (Value::string("score"), Value::Float(id as f64 * 0.5)),
            (
                Value::string("tags"),
                Value::Array(vec![Value::string("a"), Value::string("b")]),
            ),
        ])
    };
    Value::Array((0..64).map(|i| record(i, "benchmark")).collect())
}

fn bench_wire(c: &mut Criterion) {
    let value = sample_value();
    let bytes = pack(&value).unwrap();

    let mut group = c.benchmark_group("wire");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("pack", |b| {
        b.iter(|| pack(black_box(&value)).unwrap());
    });

    group.bench_function("unpack_exact", |b| {
        b.iter(|| unpack_exact(black_box(&bytes)).unwrap());
    });

    group.finish();
}

#[derive(Debug, Clone, PartialEq)]
struct Player {
    id: i64,
    name: String,
    score: f64,
    tags: Vec<String>,
}

fn player_codec() -> Codec<Player> {
    codec::object4(
        |id, name, score, tags| Player {
            id,
            name,
            score,
            tags,
        },
        codec::field("id", codec::int(), |p: &Player| p.id),
        codec::field("name", codec::string(), |p: &Player| p.name.clone()),
        codec::field("score", codec::float(), |p: &Player| p.score),
        codec::field("tags", codec::list(codec::string()), |p: &Player| {
            p.tags.clone()
        }),
    )
}

fn bench_typed_codec(c: &mut Criterion) {
    let players = codec::list(player_codec());
    let roster: Vec<Player> = (0..64)
        .map(|i| Player {
            id: i,
            name: "benchmark".to_string(),
            score: i as f64 * 0.5,
            tags: vec!["a".to_string(), "b".to_string()],
        })
        .collect();
    let bytes = players.to_bytes(&roster).unwrap();

    let mut group = c.benchmark_group("typed_codec");
    group.throughput(Throughput::Elements(roster.len() as u64));

    group.bench_function("to_bytes", |b| {
        b.iter(|| players.to_bytes(black_box(&roster)).unwrap());
    });

    group.bench_function("from_bytes", |b| {
        b.iter(|| players.from_bytes(black_box(&bytes)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_wire, bench_typed_codec);
criterion_main!(benches);
