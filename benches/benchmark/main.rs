use criterion::criterion_main;

mod common;
mod context;
mod core;
mod formatting;

criterion_main!(core::core_benches, context::context_benches, formatting::formatting_benches);
