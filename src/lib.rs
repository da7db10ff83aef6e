pub mod dsp; // Per-sample oscillator and noise math
pub mod engine; // Session assembly and the pull API
pub mod error;
pub mod graph; // Block-based stereo sample sources
pub mod io;
pub mod schedule; // Breakpoints and parameter curves

pub use error::{Error, Result};

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Rate used by the reference sessions.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Fixed attenuation applied to every source before mixing.
pub const HEADROOM: f64 = 0.5;
