use std::sync::Arc;

use crate::{
    dsp::oscillator::PhaseAccumulator,
    graph::node::{position_to_time, Frame, SampleSource},
    schedule::Schedule,
    HEADROOM,
};

/*
Binaural Tone
=============

A binaural beat is not mixed in the air: each ear gets its own pure tone
and the brain perceives the difference as a slow beat.

  left ear    frequency(t)
  right ear   frequency(t) + beat_frequency(t)

Example at t = 5s in a 300 → 150 Hz / 10 → 6 Hz session:
  left  = 225 Hz
  right = 225 + 8 = 233 Hz     → an 8 Hz beat

Each ToneNode drives exactly one channel and leaves the other at zero, so
the two nodes are summed by a Mix. Each keeps its own sample position and
phase; nothing is shared between them except the read-only Schedule.

Per sample n:
  t     = n / sample_rate
  out   = sin(φ) · tone_volume(t) · 0.5
  φ    += 2π · f(t) / sample_rate
*/

/// Which ear a tone is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Plays the carrier frequency
    Left,
    /// Plays the carrier plus the beat frequency
    Right,
}

impl Channel {
    /// Instantaneous frequency this channel plays at `t`.
    pub fn frequency_at(self, schedule: &Schedule, t: f64) -> f64 {
        match self {
            Channel::Left => schedule.frequency(t),
            Channel::Right => schedule.frequency(t) + schedule.beat_frequency(t),
        }
    }

    fn index(self) -> usize {
        match self {
            Channel::Left => 0,
            Channel::Right => 1,
        }
    }
}

/// Variable-frequency sine tone on one channel.
pub struct ToneNode {
    schedule: Arc<Schedule>,
    channel: Channel,
    osc: PhaseAccumulator,
    sample_rate: f64,
    position: u64,
}

impl ToneNode {
    pub fn new(schedule: Arc<Schedule>, channel: Channel, sample_rate: u32) -> Self {
        Self {
            schedule,
            channel,
            osc: PhaseAccumulator::new(sample_rate),
            sample_rate: sample_rate as f64,
            position: 0,
        }
    }

    pub fn left(schedule: Arc<Schedule>, sample_rate: u32) -> Self {
        Self::new(schedule, Channel::Left, sample_rate)
    }

    pub fn right(schedule: Arc<Schedule>, sample_rate: u32) -> Self {
        Self::new(schedule, Channel::Right, sample_rate)
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Index of the next sample to be produced.
    pub fn position(&self) -> u64 {
        self.position
    }

    fn next_sample(&mut self) -> f32 {
        let t = position_to_time(self.position, self.sample_rate);
        let frequency = self.channel.frequency_at(&self.schedule, t);
        let volume = self.schedule.tone_volume(t);

        let sample = self.osc.tick(frequency) * volume * HEADROOM;
        self.position += 1;
        sample as f32
    }
}

impl SampleSource for ToneNode {
    fn render_block(&mut self, out: &mut [Frame]) -> usize {
        let channel = self.channel.index();
        for frame in out.iter_mut() {
            let sample = self.next_sample();
            *frame = [0.0; 2];
            frame[channel] = sample;
        }
        out.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::node::SILENCE, schedule::Breakpoint};
    use std::f64::consts::TAU;

    const SAMPLE_RATE: u32 = 48_000;

    fn constant(frequency: f64, beat: f64, volume: f64) -> Arc<Schedule> {
        Arc::new(
            Schedule::new(vec![
                Breakpoint::new(0.0, frequency, beat).with_tone_volume(volume)
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_left_tone_only_writes_left() {
        let mut tone = ToneNode::left(constant(440.0, 10.0, 1.0), SAMPLE_RATE);
        let mut buffer = vec![SILENCE; 256];
        assert_eq!(tone.render_block(&mut buffer), 256);

        assert!(buffer.iter().all(|f| f[1] == 0.0));
        assert!(buffer.iter().any(|f| f[0].abs() > 0.1));
    }

    #[test]
    fn test_right_tone_adds_beat_frequency() {
        let mut tone = ToneNode::right(constant(200.0, 10.0, 0.8), SAMPLE_RATE);
        let mut buffer = vec![SILENCE; 512];
        tone.render_block(&mut buffer);

        for (n, frame) in buffer.iter().enumerate() {
            let expected = (TAU * 210.0 * n as f64 / SAMPLE_RATE as f64).sin() * 0.8 * 0.5;
            assert_eq!(frame[0], 0.0);
            assert!(
                (frame[1] as f64 - expected).abs() < 1e-6,
                "sample {n}: expected {expected}, got {}",
                frame[1]
            );
        }
    }

    #[test]
    fn test_headroom_limits_peak() {
        let mut tone = ToneNode::left(constant(1_000.0, 0.0, 1.0), SAMPLE_RATE);
        let mut buffer = vec![SILENCE; 4_800];
        tone.render_block(&mut buffer);

        let peak = buffer.iter().fold(0.0f32, |acc, f| acc.max(f[0].abs()));
        assert!(peak <= 0.5 + 1e-6, "peak {peak} exceeds headroom");
        assert!(peak > 0.49, "peak {peak} should reach close to 0.5");
    }

    #[test]
    fn test_block_size_does_not_change_output() {
        let schedule = Arc::new(
            Schedule::new(vec![
                Breakpoint::new(0.0, 100.0, 4.0),
                Breakpoint::new(0.05, 900.0, 12.0).with_tone_volume(0.4),
            ])
            .unwrap(),
        );

        let mut whole = ToneNode::right(schedule.clone(), SAMPLE_RATE);
        let mut whole_buf = vec![SILENCE; 4_096];
        whole.render_block(&mut whole_buf);

        let mut chunked = ToneNode::right(schedule, SAMPLE_RATE);
        let mut chunked_buf = vec![SILENCE; 4_096];
        for chunk in chunked_buf.chunks_mut(61) {
            chunked.render_block(chunk);
        }

        assert_eq!(whole_buf, chunked_buf);
        assert_eq!(chunked.position(), 4_096);
    }

    #[test]
    fn test_sweep_stays_continuous() {
        // 100 Hz → 2 kHz in 100ms: no sample-to-sample jump larger than the
        // steepest slope a 2 kHz tone can have.
        let schedule = Arc::new(
            Schedule::new(vec![
                Breakpoint::new(0.0, 100.0, 0.0),
                Breakpoint::new(0.1, 2_000.0, 0.0),
            ])
            .unwrap(),
        );
        let mut tone = ToneNode::left(schedule, SAMPLE_RATE);
        let mut buffer = vec![SILENCE; 4_800];
        tone.render_block(&mut buffer);

        let max_step = (TAU * 2_000.0 / SAMPLE_RATE as f64 * 0.5) as f32 + 1e-4;
        for pair in buffer.windows(2) {
            let step = (pair[1][0] - pair[0][0]).abs();
            assert!(step <= max_step, "discontinuity of {step}");
        }
    }

    #[test]
    fn test_channel_frequency_at() {
        let schedule = constant(300.0, -7.0, 1.0);
        assert_eq!(Channel::Left.frequency_at(&schedule, 1.0), 300.0);
        assert_eq!(Channel::Right.frequency_at(&schedule, 1.0), 293.0);
    }
}
