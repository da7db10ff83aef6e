//! Scheduled-source and full-session benchmarks.
//!
//! These model the playback path: schedule lookups per sample, the noise
//! gate, and the complete mix pulled by a sink.

mod session;
mod sources;

pub use session::bench_session;
pub use sources::bench_sources;

use binaural_dsp::schedule::Breakpoint;

/// A one-hour session with a breakpoint every minute.
pub fn hour_session() -> Vec<Breakpoint> {
    (0..=60)
        .map(|minute| {
            let m = minute as f64;
            let bp = Breakpoint::new(m * 60.0, 300.0 - m, 10.0 - m / 10.0).with_tone_volume(0.1);
            if minute % 2 == 0 {
                bp.with_noise(0.4)
            } else {
                bp
            }
        })
        .collect()
}
