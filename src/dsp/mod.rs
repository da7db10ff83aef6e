//! Low-level per-sample primitives used by the graph sources.
//!
//! These components are allocation-free and hold only fixed-size state, so
//! they can run inside an audio callback. They stay focused on the signal
//! math; the graph layer adds scheduling, channel routing and blocks.

/// Voss-McCartney pink noise.
pub mod noise;
/// Phase-accumulating sine oscillator.
pub mod oscillator;

pub use noise::PinkNoise;
pub use oscillator::PhaseAccumulator;
