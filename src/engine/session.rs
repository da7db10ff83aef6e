use std::sync::Arc;

use log::debug;

use crate::{
    dsp::noise::PinkNoise,
    engine::config::EngineConfig,
    error::{Error, Result},
    graph::{
        extensions::NodeExt,
        mix::Mix,
        node::{Frame, SampleSource},
        noise_gate::NoiseGate,
        take::Take,
        tone::ToneNode,
    },
    schedule::{Breakpoint, Schedule},
};

/// The unbounded session mix: both tones plus gated noise.
pub type SessionMix = Mix<Mix<ToneNode, ToneNode>, NoiseGate>;

/// A complete, bounded binaural session ready to be pulled by a sink.
///
/// The engine is single-producer: one thread pulls blocks and owns all
/// oscillator and noise state. Status readers on other threads use
/// [`BinauralEngine::schedule`], whose queries are pure.
pub struct BinauralEngine {
    schedule: Arc<Schedule>,
    sample_rate: u32,
    total_frames: u64,
    output: Take<SessionMix>,
}

impl BinauralEngine {
    /// Stretch and schedule `breakpoints`, then build the signal chain.
    pub fn new(breakpoints: Vec<Breakpoint>, config: EngineConfig) -> Result<Self> {
        if config.sample_rate == 0 {
            return Err(Error::InvalidSampleRate);
        }

        let schedule = Schedule::stretched(breakpoints, config.stretch)?;
        Self::from_schedule(Arc::new(schedule), config)
    }

    /// Build the signal chain over an existing schedule.
    ///
    /// `config.stretch` is ignored; the schedule's times are used as-is.
    pub fn from_schedule(schedule: Arc<Schedule>, config: EngineConfig) -> Result<Self> {
        let sample_rate = config.sample_rate;
        if sample_rate == 0 {
            return Err(Error::InvalidSampleRate);
        }

        let total_frames = schedule.total_frames(sample_rate);
        if total_frames == 0 {
            return Err(Error::ZeroDuration);
        }

        let noise = match config.seed {
            Some(seed) => PinkNoise::seeded(seed),
            None => PinkNoise::from_os_rng(),
        };

        let output = ToneNode::left(schedule.clone(), sample_rate)
            .mix(ToneNode::right(schedule.clone(), sample_rate))
            .mix(NoiseGate::new(noise, schedule.clone(), sample_rate))
            .take(total_frames);

        debug!(
            "engine ready: {:.2}s at {} Hz ({} frames)",
            schedule.total_duration(),
            sample_rate,
            total_frames
        );

        Ok(Self {
            schedule,
            sample_rate,
            total_frames,
            output,
        })
    }

    /// Shared handle to the schedule, safe to query from any thread.
    pub fn schedule(&self) -> &Arc<Schedule> {
        &self.schedule
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Session length in frames.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Session length in seconds.
    pub fn total_duration(&self) -> f64 {
        self.schedule.total_duration()
    }

    pub fn remaining_frames(&self) -> u64 {
        self.output.remaining()
    }

    /// Frames produced so far.
    pub fn position(&self) -> u64 {
        self.total_frames - self.output.remaining()
    }
}

impl SampleSource for BinauralEngine {
    fn render_block(&mut self, out: &mut [Frame]) -> usize {
        self.output.render_block(out)
    }

    fn is_finished(&self) -> bool {
        self.output.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::SILENCE;

    fn session() -> Vec<Breakpoint> {
        vec![
            Breakpoint::new(0.0, 300.0, 10.0)
                .with_tone_volume(0.1)
                .with_noise(0.4),
            Breakpoint::new(1.0, 150.0, 6.0).with_tone_volume(0.15),
        ]
    }

    #[test]
    fn test_empty_breakpoints_fail() {
        let result = BinauralEngine::new(vec![], EngineConfig::default());
        assert!(matches!(result, Err(Error::EmptySchedule)));
    }

    #[test]
    fn test_zero_duration_fails() {
        let result = BinauralEngine::new(
            vec![Breakpoint::new(0.0, 200.0, 5.0)],
            EngineConfig::default(),
        );
        assert!(matches!(result, Err(Error::ZeroDuration)));
    }

    #[test]
    fn test_zero_sample_rate_fails() {
        let result = BinauralEngine::new(session(), EngineConfig::default().with_sample_rate(0));
        assert!(matches!(result, Err(Error::InvalidSampleRate)));
    }

    #[test]
    fn test_bad_stretch_fails() {
        let result = BinauralEngine::new(session(), EngineConfig::default().with_stretch(0.0));
        assert!(matches!(result, Err(Error::InvalidStretch(_))));
    }

    #[test]
    fn test_stretch_lengthens_session() {
        let engine =
            BinauralEngine::new(session(), EngineConfig::default().with_stretch(2.5)).unwrap();
        assert_eq!(engine.total_duration(), 2.5);
        assert_eq!(engine.total_frames(), 110_250);
    }

    #[test]
    fn test_position_tracks_rendering() {
        let mut engine =
            BinauralEngine::new(session(), EngineConfig::default().with_seed(1)).unwrap();
        let mut buffer = vec![SILENCE; 1_000];

        engine.render_block(&mut buffer);
        assert_eq!(engine.position(), 1_000);
        assert_eq!(engine.remaining_frames(), 44_100 - 1_000);
        assert!(!engine.is_finished());
    }

    #[test]
    fn test_seeded_engines_match() {
        let config = EngineConfig::default().with_seed(99);
        let mut a = BinauralEngine::new(session(), config).unwrap();
        let mut b = BinauralEngine::new(session(), config).unwrap();

        let mut buf_a = vec![SILENCE; 2_048];
        let mut buf_b = vec![SILENCE; 2_048];
        a.render_block(&mut buf_a);
        b.render_block(&mut buf_b);
        assert_eq!(buf_a, buf_b);
    }
}
