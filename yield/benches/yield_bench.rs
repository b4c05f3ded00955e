use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use accrue_types::params::SECONDS_PER_DAY;
use accrue_yield::compute_yield;

fn bench_compute_yield(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_yield");

    for principal in [1_000_000u128, 1_000_000_000_000, u128::MAX / 10_000_000_000] {
        group.bench_with_input(
            BenchmarkId::new("principal", principal),
            &principal,
            |b, &p| {
                b.iter(|| {
                    black_box(compute_yield(
                        black_box(p),
                        black_box(30 * SECONDS_PER_DAY),
                        black_box(750),
                    ))
                });
            },
        );
    }

    group.finish();
}

fn bench_compute_yield_sub_day(c: &mut Criterion) {
    c.bench_function("compute_yield_sub_day", |b| {
        b.iter(|| black_box(compute_yield(black_box(1_000_000), black_box(3_600), black_box(750))));
    });
}

criterion_group!(benches, bench_compute_yield, bench_compute_yield_sub_day);
criterion_main!(benches);
