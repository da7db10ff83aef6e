//! Benchmarks for per-sample DSP primitives.

mod noise;
mod oscillator;

pub use noise::bench_noise;
pub use oscillator::bench_oscillator;
