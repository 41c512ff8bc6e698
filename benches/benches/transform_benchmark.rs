//! Daily report benchmarks over synthetic Xetra data.
//!
//! Run with: `cargo bench --package xetra-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tempfile::TempDir;
use tokio::runtime::Runtime;
use xetra_bench::{SyntheticConfig, to_csv};
use xetra_lib::prelude::*;
use xetra_lib::read_summaries;

/// Data set sizes, by number of securities.
fn benchmark_configs() -> Vec<(&'static str, SyntheticConfig)> {
    vec![
        (
            "100-isins",
            SyntheticConfig {
                isins: 100,
                ..Default::default()
            },
        ),
        (
            "1000-isins",
            SyntheticConfig {
                isins: 1000,
                ..Default::default()
            },
        ),
    ]
}

fn transform_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");

    for (name, config) in benchmark_configs() {
        let records = config.records();
        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(BenchmarkId::new("summarize", name), &records, |b, records| {
            b.iter(|| summarize(black_box(records)));
        });
    }

    group.finish();
}

fn decode_benchmark(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("decode");

    for (name, config) in benchmark_configs() {
        let records = config.records();
        let body = to_csv(&records);
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::new("csv", name), &body, |b, body| {
            b.to_async(&rt).iter(|| async {
                xetra_lib::decode_records("2022-12-24/bench.csv", black_box(body.as_bytes()))
                    .await
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn parquet_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("parquet");

    for (name, config) in benchmark_configs() {
        let rows = summarize(&config.records());
        let formatter = ParquetFormatter::new();
        let encoded = formatter.to_bytes(&rows).unwrap();
        group.throughput(Throughput::Elements(rows.len() as u64));

        group.bench_with_input(BenchmarkId::new("write", name), &rows, |b, rows| {
            b.iter(|| formatter.to_bytes(black_box(rows)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("read", name), &encoded, |b, encoded| {
            b.iter(|| read_summaries(black_box(encoded.clone())).unwrap());
        });
    }

    group.finish();
}

fn pipeline_benchmark(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);

    for (name, config) in benchmark_configs() {
        let window: ExtractionWindow = "2022-12-25".parse().unwrap();
        let objects = config.objects();
        group.throughput(Throughput::Elements(config.total_records()));

        group.bench_with_input(BenchmarkId::new("local", name), &objects, |b, objects| {
            b.to_async(&rt).iter(|| async {
                let target = TempDir::new().unwrap();
                let pipeline = EtlPipeline::new(
                    Box::new(MemoryStore::with_objects(objects.clone())),
                    Box::new(LocalStore::new(target.path())),
                );
                pipeline.run(&window).await.unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    transform_benchmark,
    decode_benchmark,
    parquet_benchmark,
    pipeline_benchmark
);
criterion_main!(benches);
