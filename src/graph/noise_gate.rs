use std::sync::Arc;

use rand::{rngs::StdRng, Rng};

use crate::{
    dsp::noise::PinkNoise,
    graph::node::{position_to_time, Frame, SampleSource},
    schedule::Schedule,
    HEADROOM,
};

/// Pink noise switched and scaled by the schedule's stepped noise setting.
///
/// The generator is advanced on every frame, even while gated off, so the
/// noise sequence does not depend on the schedule. The mono sample is
/// written identically to both channels.
pub struct NoiseGate<R = StdRng> {
    noise: PinkNoise<R>,
    schedule: Arc<Schedule>,
    sample_rate: f64,
    position: u64,
}

impl<R: Rng> NoiseGate<R> {
    pub fn new(noise: PinkNoise<R>, schedule: Arc<Schedule>, sample_rate: u32) -> Self {
        Self {
            noise,
            schedule,
            sample_rate: sample_rate as f64,
            position: 0,
        }
    }

    pub fn position(&self) -> u64 {
        self.position
    }
}

impl<R: Rng + Send> SampleSource for NoiseGate<R> {
    fn render_block(&mut self, out: &mut [Frame]) -> usize {
        for frame in out.iter_mut() {
            let t = position_to_time(self.position, self.sample_rate);
            let sample = self.noise.next_sample();
            let setting = self.schedule.noise(t);

            *frame = if setting.on {
                let s = (sample * setting.volume * HEADROOM) as f32;
                [s, s]
            } else {
                [0.0, 0.0]
            };
            self.position += 1;
        }
        out.len()
    }
}
