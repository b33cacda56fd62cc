use crate::common::configure_criterion;
use criterion::{criterion_group, BenchmarkId, Criterion};
use errtrail::{new, ops, ContextMap};
use std::hint::black_box;

pub fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("context/fill");

    for depth in [1, 4, 16] {
        let _scope = ops::begin("request").set("tenant", "acme").set("region", "eu");
        let mut err = new!("bottom").with("row", 1);
        for i in 0..depth {
            err = new!("layer {}: {}", i, err).with("layer", i);
        }

        group.bench_with_input(BenchmarkId::from_parameter(depth), &err, |b, err| {
            b.iter(|| {
                let mut fields = ContextMap::new();
                err.fill(&mut fields);
                black_box(fields)
            })
        });
    }
    group.finish();
}

pub fn bench_scoped_creation(c: &mut Criterion) {
    c.bench_function("context/scoped_creation", |b| {
        let _outer = ops::begin("request").set("user", "u-1");
        let _inner = ops::begin("db").set("table", "users");
        b.iter(|| black_box(new!("row {} locked", 7)))
    });
}

criterion_group! {
    name = context_benches;
    config = configure_criterion();
    targets = bench_fill, bench_scoped_creation,
}
