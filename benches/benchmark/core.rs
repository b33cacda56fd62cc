use crate::common::{configure_criterion, DomainError};
use criterion::{criterion_group, BenchmarkId, Criterion};
use errtrail::{new, Error};
use std::hint::black_box;

pub fn bench_root_creation(c: &mut Criterion) {
    c.bench_function("core/root_creation", |b| {
        b.iter(|| black_box(new!("user {} not found", black_box(42))))
    });
}

pub fn bench_wrapping_creation(c: &mut Criterion) {
    c.bench_function("core/wrapping_creation", |b| {
        b.iter(|| {
            black_box(
                new!("query failed: {}", DomainError::Database("pool exhausted".to_string()))
                    .op("load_user")
                    .with("host", "db-primary-01")
                    .with("retry_count", 3),
            )
        })
    });
}

pub fn bench_error_clone(c: &mut Criterion) {
    let err = Error::new("shared").with("k", 1);
    c.bench_function("core/error_clone", |b| b.iter(|| black_box(err.clone())));
}

pub fn bench_chain_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("core/root_cause");

    for depth in [5, 10, 20, 50] {
        let mut err = new!("bottom: {}", DomainError::Network("reset".to_string()));
        for i in 0..depth {
            err = new!("layer {}: {}", i, err);
        }

        group.bench_with_input(BenchmarkId::from_parameter(depth), &err, |b, err| {
            b.iter(|| black_box(err.root_cause().to_string()))
        });
    }
    group.finish();
}

criterion_group! {
    name = core_benches;
    config = configure_criterion();
    targets =
        bench_root_creation,
        bench_wrapping_creation,
        bench_error_clone,
        bench_chain_depth,
}
