use criterion::{criterion_group, criterion_main};

mod chart;

use chart::register_benchmarks as register_chart_benchmarks;
use records::register_benchmarks as register_record_benchmarks;

// Define the benchmark groups
criterion_group!(
    benches,
    register_record_benchmarks,
    register_chart_benchmarks,
);

criterion_main!(benches);
