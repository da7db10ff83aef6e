use crate::graph::{mix::Mix, node::SampleSource, take::Take};

pub trait NodeExt: SampleSource + Sized {
    fn mix<S: SampleSource>(self, source: S) -> Mix<Self, S> {
        Mix::new(self, source)
    }

    fn take(self, frames: u64) -> Take<Self> {
        Take::new(self, frames)
    }
}

impl<T: SampleSource> NodeExt for T {}
