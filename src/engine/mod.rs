//! Session assembly.
//!
//! Builds the full signal chain for a list of breakpoints and exposes the
//! single pull API a sink needs:
//!
//! ```text
//!   Schedule ──┬──→ ToneNode (left)  ──┐
//!              ├──→ ToneNode (right) ──┼──→ Mix ──→ Take ──→ sink
//!              └──→ NoiseGate ─────────┘
//! ```

pub mod config;
pub mod session;

pub use config::EngineConfig;
pub use session::{BinauralEngine, SessionMix};
