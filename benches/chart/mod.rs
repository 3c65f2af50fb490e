mod sync;

pub use sync::register_benchmarks;
