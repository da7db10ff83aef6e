pub mod breakpoint;
pub mod curve;
pub mod status;

pub use breakpoint::Breakpoint;
pub use curve::{NoiseSetting, Schedule};
pub use status::Status;
