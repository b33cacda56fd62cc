use crate::common::{configure_criterion, DomainError};
use criterion::{criterion_group, Criterion};
use errtrail::{new, TraceFormatConfig};
use std::hint::black_box;

pub fn bench_trace_rendering(c: &mut Criterion) {
    let inner = new!("load: {}", DomainError::Database("timeout".to_string()));
    let err = new!("request failed: {}", inner);
    // Resolve symbols once so the loop measures rendering only.
    let _ = format!("{err:#}");

    c.bench_function("formatting/full_trace", |b| b.iter(|| black_box(format!("{err:#}"))));

    c.bench_function("formatting/compact_trace", |b| {
        b.iter(|| {
            let mut out = String::new();
            errtrail::MultiLinePrinter::with_config(&err, TraceFormatConfig::compact())
                .write_all(&mut out)
                .ok();
            black_box(out)
        })
    });
}

pub fn bench_bridge_recovery(c: &mut Criterion) {
    let root = new!("disk full");
    c.bench_function("formatting/bridge_recover", |b| {
        b.iter(|| black_box(errtrail::wrap(std::io::Error::other(format!("upload: {root}")))))
    });
}

criterion_group! {
    name = formatting_benches;
    config = configure_criterion();
    targets = bench_trace_rendering, bench_bridge_recovery,
}
