use crate::graph::node::{Frame, SampleSource};

/// Bounds a source to a fixed number of frames.
///
/// Once `frames` have been produced the stream reports end-of-data and
/// never yields another frame. This is the only way a session ends; a
/// consumer that wants to stop early simply stops pulling.
pub struct Take<S> {
    source: S,
    remaining: u64,
}

impl<S> Take<S> {
    pub fn new(source: S, frames: u64) -> Self {
        Self {
            source,
            remaining: frames,
        }
    }

    /// Frames left before end-of-data.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn inner(&self) -> &S {
        &self.source
    }
}

impl<S: SampleSource> SampleSource for Take<S> {
    fn render_block(&mut self, out: &mut [Frame]) -> usize {
        if self.remaining == 0 {
            return 0;
        }

        let wanted = (out.len() as u64).min(self.remaining) as usize;
        let produced = self.source.render_block(&mut out[..wanted]);
        self.remaining -= produced as u64;

        // inner source ran dry before the bound
        if produced < wanted {
            self.remaining = 0;
        }
        produced
    }

    fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}
