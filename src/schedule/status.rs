use std::fmt;

use crate::schedule::curve::NoiseSetting;

/// Snapshot of every schedule parameter at one moment, for progress display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    /// Seconds since session start
    pub time: f64,
    /// Session length in seconds
    pub total: f64,
    pub frequency: f64,
    pub beat_frequency: f64,
    pub tone_volume: f64,
    pub noise: NoiseSetting,
}

impl Status {
    /// Progress through the session, clamped to 0.0 - 1.0.
    pub fn progress(&self) -> f64 {
        if self.total <= 0.0 {
            return 1.0;
        }
        (self.time / self.total).clamp(0.0, 1.0)
    }

    /// Frequency heard in the right ear.
    pub fn right_frequency(&self) -> f64 {
        self.frequency + self.beat_frequency
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time: {:.2} s / Total {:.2} s, Base Frequency: {:.2} Hz, Beat Frequency: {:.2} Hz, \
             Tone Volume: {:.2}, Pink Noise On: {}, Pink Noise Volume: {:.2}",
            self.time,
            self.total,
            self.frequency,
            self.beat_frequency,
            self.tone_volume,
            self.noise.on,
            self.noise.volume
        )
    }
}
