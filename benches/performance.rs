//! Performance benchmarks for bench-result-schema
//!
//! Measures single-record construction for each input form and batch
//! ingestion throughput for both input formats.

use bench_result_schema::{DurationUnit, InputFormat, Ingestor, ResultRecord};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::io::{self, Cursor};

/// Generate `count` records, every `invalid_every`-th one with a zero Avg
fn generate_records(count: usize, invalid_every: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let avg = if invalid_every > 0 && i % invalid_every == 0 {
                "0".to_string()
            } else {
                format!("{}.{}", i + 1, i % 1000)
            };
            let unit = DurationUnit::ALL[i % DurationUnit::ALL.len()];
            format!(r#"{{"Test":"bench_{i}","Avg":"{avg}","Unit":"{unit}"}}"#)
        })
        .collect()
}

fn bench_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct");

    group.bench_function("text_valid", |b| {
        b.iter(|| ResultRecord::construct(black_box("bench1"), black_box("123.456"), black_box("sec")))
    });

    group.bench_function("typed_valid", |b| {
        b.iter(|| {
            ResultRecord::construct(
                black_box("bench1"),
                black_box(123.456_f64),
                black_box(DurationUnit::Ns),
            )
        })
    });

    group.bench_function("text_invalid_both", |b| {
        b.iter(|| ResultRecord::construct(black_box("bench1"), black_box("-inf"), black_box("Day")))
    });

    group.finish();
}

fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");

    for count in [100, 1_000, 10_000] {
        let records = generate_records(count, 10);
        let array = format!("[{}]", records.join(","));
        let lines = records.join("\n");

        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("json", count), &array, |b, input| {
            let ingestor = Ingestor::new(InputFormat::Json);
            b.iter(|| ingestor.process(Cursor::new(input.as_bytes()), io::sink()))
        });

        group.bench_with_input(BenchmarkId::new("jsonl", count), &lines, |b, input| {
            let ingestor = Ingestor::new(InputFormat::JsonLines);
            b.iter(|| ingestor.process(Cursor::new(input.as_bytes()), io::sink()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_construct, bench_ingest);
criterion_main!(benches);
