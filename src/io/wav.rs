use std::{
    fs::File,
    io::{BufWriter, Seek, Write},
    path::Path,
};

use hound::{SampleFormat, WavSpec, WavWriter};
use log::info;

use crate::{
    error::{Error, Result},
    graph::node::{Frame, SampleSource, SILENCE},
    MAX_BLOCK_SIZE,
};

/// Stereo 16-bit integer PCM at `sample_rate`.
pub fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Clamp to [-1, 1] and scale to the 16-bit range.
pub fn quantize(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// Render `source` to a WAV file at `path` until it reports end-of-data.
///
/// Returns the number of frames written.
pub fn write_wav<P, S>(path: P, source: &mut S, sample_rate: u32) -> Result<u64>
where
    P: AsRef<Path>,
    S: SampleSource + ?Sized,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let frames = write_wav_to(BufWriter::new(file), source, sample_rate)?;

    info!(
        "wrote {} frames ({:.2}s) to {:?}",
        frames,
        frames as f64 / sample_rate as f64,
        path
    );
    Ok(frames)
}

/// Render `source` into any seekable writer.
pub fn write_wav_to<W, S>(writer: W, source: &mut S, sample_rate: u32) -> Result<u64>
where
    W: Write + Seek,
    S: SampleSource + ?Sized,
{
    if sample_rate == 0 {
        return Err(Error::InvalidSampleRate);
    }

    let mut wav = WavWriter::new(writer, wav_spec(sample_rate))?;
    let mut block: Vec<Frame> = vec![SILENCE; MAX_BLOCK_SIZE];
    let mut written = 0u64;

    loop {
        let produced = source.render_block(&mut block);
        for [left, right] in &block[..produced] {
            wav.write_sample(quantize(*left))?;
            wav.write_sample(quantize(*right))?;
        }
        written += produced as u64;

        if produced < block.len() {
            break;
        }
    }

    wav.finalize()?;
    Ok(written)
}
