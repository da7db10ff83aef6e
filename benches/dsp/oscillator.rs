//! Benchmarks for phase-accumulating sine generation.

use std::hint::black_box;

use binaural_dsp::dsp::oscillator::PhaseAccumulator;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f64; size];

        // Fixed frequency
        let mut osc = PhaseAccumulator::new(44_100);
        group.bench_with_input(BenchmarkId::new("constant", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    *out = osc.tick(black_box(440.0));
                }
            })
        });

        // Frequency changes every sample, as during a sweep
        let mut osc = PhaseAccumulator::new(44_100);
        group.bench_with_input(BenchmarkId::new("sweep", size), &size, |b, _| {
            b.iter(|| {
                for (n, out) in buffer.iter_mut().enumerate() {
                    *out = osc.tick(black_box(300.0 - n as f64 * 0.01));
                }
            })
        });
    }

    group.finish();
}
