use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kollect::{collect, Collection, Value};

fn sample(size: i64) -> Collection {
    Collection::range(1, size)
}

fn nested_sample(size: i64) -> Collection {
    let groups: Vec<Value> = (0..size)
        .map(|i| Value::from(vec![i, i + 1, i + 2]))
        .collect();
    collect(groups)
}

fn benchmark_make(c: &mut Criterion) {
    let mut group = c.benchmark_group("make");
    for size in [100i64, 1_000, 10_000] {
        let values: Vec<i64> = (0..size).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &values, |b, values| {
            b.iter(|| collect(black_box(values.clone())));
        });
    }
    group.finish();
}

fn benchmark_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    for size in [100i64, 1_000, 10_000] {
        let collection = sample(size).shuffle_seeded(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &collection,
            |b, collection| {
                b.iter(|| black_box(collection).sort());
            },
        );
    }
    group.finish();
}

fn benchmark_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");
    for size in [100i64, 1_000] {
        let left = sample(size);
        let right = sample(size / 2);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(&left).diff(black_box(&right).clone()));
        });
    }
    group.finish();
}

fn benchmark_chunk(c: &mut Criterion) {
    let collection = sample(10_000);
    c.bench_function("chunk_10k_by_64", |b| {
        b.iter(|| black_box(&collection).chunk(64));
    });
}

fn benchmark_flatten(c: &mut Criterion) {
    let collection = nested_sample(1_000);
    c.bench_function("flatten_1k_triples", |b| {
        b.iter(|| black_box(&collection).flatten());
    });
}

fn benchmark_merge(c: &mut Criterion) {
    let left = sample(1_000);
    let right = sample(1_000);
    c.bench_function("merge_1k", |b| {
        b.iter(|| black_box(&left).merge(black_box(&right).clone()));
    });
}

criterion_group!(
    benches,
    benchmark_make,
    benchmark_sort,
    benchmark_diff,
    benchmark_chunk,
    benchmark_flatten,
    benchmark_merge
);
criterion_main!(benches);
