use serde::{Deserialize, Serialize};

/// One entry of a session: parameter values pinned at `time` seconds.
///
/// Everything except `noise_on` is interpolated linearly towards the next
/// breakpoint. Field names follow the session file keys.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Seconds from session start
    pub time: f64,
    /// Carrier frequency of the left channel (Hz)
    #[serde(default)]
    pub frequency: f64,
    /// Offset of the right channel from the carrier (Hz, may be negative)
    #[serde(default)]
    pub beat_frequency: f64,
    #[serde(default, rename = "pink_noise_on")]
    pub noise_on: bool,
    /// Pink noise level, 0.0 - 1.0 by convention
    #[serde(default, rename = "pink_noise_volume")]
    pub noise_volume: f64,
    /// Tone level, 0.0 - 1.0 by convention
    #[serde(default)]
    pub tone_volume: f64,
}

impl Breakpoint {
    /// Tone-only breakpoint at full volume with the noise switched off.
    pub fn new(time: f64, frequency: f64, beat_frequency: f64) -> Self {
        Self {
            time,
            frequency,
            beat_frequency,
            noise_on: false,
            noise_volume: 0.0,
            tone_volume: 1.0,
        }
    }

    pub fn with_tone_volume(mut self, volume: f64) -> Self {
        self.tone_volume = volume;
        self
    }

    /// Switch pink noise on at the given volume.
    pub fn with_noise(mut self, volume: f64) -> Self {
        self.noise_on = true;
        self.noise_volume = volume;
        self
    }

    /// Copy with `time` multiplied by `factor`.
    pub fn stretched(self, factor: f64) -> Self {
        Self {
            time: self.time * factor,
            ..self
        }
    }
}
