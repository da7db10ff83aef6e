//! Benchmarks for the assembled session.
//!
//! A session renders both tones and the gated noise per block, which is
//! the full per-callback cost of live playback.

use std::hint::black_box;

use binaural_dsp::{
    engine::{BinauralEngine, EngineConfig},
    graph::{SampleSource, SILENCE},
};
use criterion::{BenchmarkId, Criterion};

use super::hour_session;
use crate::BLOCK_SIZES;

pub fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/session");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![SILENCE; size];
        // Stretched to a day so the bounded stream never runs dry mid-bench
        let config = EngineConfig::default().with_seed(11).with_stretch(24.0);
        let mut engine = match BinauralEngine::new(hour_session(), config) {
            Ok(engine) => engine,
            Err(err) => panic!("bench session is invalid: {err}"),
        };

        group.bench_with_input(BenchmarkId::new("render", size), &size, |b, _| {
            b.iter(|| {
                engine.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
