//! Error type shared by the schedule, engine and io layers.

use std::path::PathBuf;

/// Result alias carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A schedule needs at least one breakpoint to produce anything.
    #[error("schedule has no breakpoints")]
    EmptySchedule,

    /// A breakpoint carries a time that cannot be placed on the timeline.
    #[error("breakpoint {index} has invalid time {time}")]
    InvalidBreakpoint { index: usize, time: f64 },

    #[error("stretch factor must be positive and finite, got {0}")]
    InvalidStretch(f64),

    #[error("sample rate must be positive")]
    InvalidSampleRate,

    /// The last breakpoint sits at t = 0 (after stretching), so there is
    /// nothing to render.
    #[error("total playback time is zero")]
    ZeroDuration,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid session file: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("wav encoding failed: {0}")]
    Wav(#[from] hound::Error),

    /// Legacy session text that could not be converted.
    #[error("sbagen conversion failed: {0}")]
    Sbagen(#[from] crate::io::sbagen::SbagenError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
