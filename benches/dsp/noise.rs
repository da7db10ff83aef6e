//! Benchmarks for Voss-McCartney pink noise.

use std::hint::black_box;

use binaural_dsp::dsp::noise::PinkNoise;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/noise");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f64; size];
        let mut noise = PinkNoise::seeded(7);

        group.bench_with_input(BenchmarkId::new("pink", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    *out = noise.next_sample();
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
