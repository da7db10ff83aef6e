use crate::DEFAULT_SAMPLE_RATE;

/// Render settings applied when a session is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Output rate in Hz, shared by every source
    pub sample_rate: u32,
    /// Multiplier applied to every breakpoint time before scheduling
    pub stretch: f64,
    /// Fixed seed for the pink noise; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_stretch(mut self, stretch: f64) -> Self {
        self.stretch = stretch;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            stretch: 1.0,
            seed: None,
        }
    }
}
