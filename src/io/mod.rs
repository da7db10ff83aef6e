// Purpose - session files, legacy conversion and offline output

/// YAML session files (`frequency_changes`).
pub mod config;
/// Legacy sbagen sequence conversion.
pub mod sbagen;
/// 16-bit stereo WAV output.
pub mod wav;

pub use config::SessionFile;
pub use wav::{write_wav, write_wav_to};
