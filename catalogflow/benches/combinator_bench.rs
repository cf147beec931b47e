//! Benchmarks for the result combinators.

use catalogflow::errors::{Cause, ErrorKind};
use catalogflow::outcome::{DomainResult, Outcome};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn successes(n: usize) -> Vec<Outcome<usize>> {
    (0..n).map(Outcome::Success).collect()
}

fn sequence_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence");
    for size in [4_usize, 64, 1024] {
        group.bench_with_input(BenchmarkId::new("all_success", size), &size, |b, &size| {
            b.iter_batched(
                || successes(size),
                |items| black_box(Outcome::sequence(items)),
                criterion::BatchSize::SmallInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("first_error", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut items = successes(size);
                    items[0] = Outcome::Error(ErrorKind::unknown(Cause::msg("boom")));
                    items
                },
                |items| black_box(Outcome::sequence(items)),
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn chain_benchmark(c: &mut Criterion) {
    c.bench_function("map_flat_map_filter", |b| {
        b.iter(|| {
            let result = DomainResult::Success(black_box(21_i64))
                .map(|v| v * 2)
                .flat_map(|v| DomainResult::Success(v + 1))
                .filter(|v| *v > 0)
                .map_some_or(ErrorKind::validation("empty", 422), |v| Some(v - 1));
            black_box(result)
        });
    });

    c.bench_function("zip", |b| {
        b.iter(|| {
            let left = DomainResult::Success(black_box(1_u32));
            let right = DomainResult::Success(black_box("two"));
            black_box(left.zip(right))
        });
    });
}

criterion_group!(benches, sequence_benchmark, chain_benchmark);
criterion_main!(benches);
