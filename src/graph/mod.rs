//! Block-based stereo sample sources.
//!
//! Graph nodes wrap the per-sample DSP primitives with what a session needs:
//! schedule lookups, channel routing, mixing and a length bound. Every node
//! implements [`node::SampleSource`]; the `extensions` module adds fluent
//! helpers so a session can be assembled as a chain.

/// Fluent combinators (`.mix()`, `.take()`).
pub mod extensions;
/// Additive mixing of two sources.
pub mod mix;
/// Core trait and frame type shared by all nodes.
pub mod node;
/// Scheduled pink noise on both channels.
pub mod noise_gate;
/// Frame-count bound with end-of-data.
pub mod take;
/// Scheduled sine tone on one channel.
pub mod tone;

pub use extensions::NodeExt;
pub use mix::Mix;
pub use node::{Frame, SampleSource, SILENCE};
pub use noise_gate::NoiseGate;
pub use take::Take;
pub use tone::{Channel, ToneNode};
