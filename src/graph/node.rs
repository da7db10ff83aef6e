/// One stereo sample: `[left, right]`, nominally in -1.0 to 1.0.
pub type Frame = [f32; 2];

pub const SILENCE: Frame = [0.0, 0.0];

/// Core trait for the stereo sample sources of a session
///
/// A source is pulled block by block. `render_block` writes frames from the
/// start of `out` and returns how many it produced. Returning fewer than
/// `out.len()` signals end-of-data; frames past the returned count are left
/// unspecified and must be ignored by the caller. Sources are not
/// restartable.
pub trait SampleSource: Send {
    fn render_block(&mut self, out: &mut [Frame]) -> usize;

    /// Whether the source has reported end-of-data.
    ///
    /// Default implementation never ends (oscillators, noise).
    fn is_finished(&self) -> bool {
        false
    }
}

/// Allow boxed sources to be used as sources (for dynamic dispatch)
impl SampleSource for Box<dyn SampleSource> {
    fn render_block(&mut self, out: &mut [Frame]) -> usize {
        (**self).render_block(out)
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }
}

/// Seconds since session start for sample `position`.
#[inline]
pub(crate) fn position_to_time(position: u64, sample_rate: f64) -> f64 {
    position as f64 / sample_rate
}
