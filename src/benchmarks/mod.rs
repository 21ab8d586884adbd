//! Shared criterion settings for the workspace benches
pub mod config {
    use criterion::{measurement::WallTime, BenchmarkGroup, Criterion};
    #[cfg(not(target_os = "windows"))]
    use pprof::criterion::{Output, PProfProfiler};
    use std::time::Duration;

    #[cfg(not(target_os = "windows"))]
    pub fn get_default_profiling_configs() -> Criterion {
        Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
    }

    /// Boosting benches fit whole ensembles per iteration, so fewer samples are taken
    pub fn set_default_benchmark_configs(benchmark: &mut BenchmarkGroup<WallTime>) {
        benchmark
            .sample_size(50)
            .measurement_time(Duration::new(10, 0))
            .confidence_level(0.97)
            .warm_up_time(Duration::new(3, 0))
            .noise_threshold(0.05);
    }
}
