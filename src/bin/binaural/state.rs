//! Playback state shared between the audio callback and observers
//!
//! The audio thread is the only writer. Readers never block it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct PlaybackState {
    /// Frames of session audio delivered to the device
    frames_played: AtomicU64,
    /// Set once the engine reports end-of-data
    finished: AtomicBool,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, frames: u64) {
        self.frames_played.fetch_add(frames, Ordering::Relaxed);
    }

    pub fn finish(&self) {
        self.finished.store(true, Ordering::Release);
    }

    pub fn frames_played(&self) -> u64 {
        self.frames_played.load(Ordering::Relaxed)
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Seconds of session audio delivered so far.
    pub fn elapsed(&self, sample_rate: u32) -> f64 {
        self.frames_played() as f64 / sample_rate as f64
    }
}
