//! Benchmarks for individual scheduled sources.

use std::{hint::black_box, sync::Arc};

use binaural_dsp::{
    dsp::noise::PinkNoise,
    graph::{NoiseGate, SampleSource, ToneNode, SILENCE},
    schedule::Schedule,
};
use criterion::{BenchmarkId, Criterion};

use super::hour_session;
use crate::BLOCK_SIZES;

pub fn bench_sources(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/sources");
    let schedule = match Schedule::new(hour_session()) {
        Ok(schedule) => Arc::new(schedule),
        Err(err) => panic!("bench session is invalid: {err}"),
    };

    for &size in BLOCK_SIZES {
        let mut buffer = vec![SILENCE; size];

        let mut tone = ToneNode::right(schedule.clone(), 44_100);
        group.bench_with_input(BenchmarkId::new("tone", size), &size, |b, _| {
            b.iter(|| {
                tone.render_block(black_box(&mut buffer));
            })
        });

        let mut gate = NoiseGate::new(PinkNoise::seeded(3), schedule.clone(), 44_100);
        group.bench_with_input(BenchmarkId::new("noise_gate", size), &size, |b, _| {
            b.iter(|| {
                gate.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
