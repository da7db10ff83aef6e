//! Player - live playback builder and runner

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    BufferSize, SampleRate, StreamConfig,
};
use log::{error, info};
use rtrb::{Producer, RingBuffer};

use super::{state::PlaybackState, ui::UiApp};

use binaural_dsp::{
    engine::BinauralEngine,
    graph::{Frame, SampleSource, SILENCE},
    schedule::Schedule,
    MAX_BLOCK_SIZE,
};

/// Capacity of the audio→UI ring, in frames
const SCOPE_RING_FRAMES: usize = 16 * 1024;

/// Time left for the device to play out its last buffer after end-of-data
const DRAIN: Duration = Duration::from_millis(250);

const POLL: Duration = Duration::from_millis(50);

/// Live playback builder
pub struct Player {
    engine: BinauralEngine,
    tui: bool,
    status_interval: Duration,
}

impl Player {
    pub fn new(engine: BinauralEngine) -> Self {
        Self {
            engine,
            tui: false,
            status_interval: Duration::from_secs(3),
        }
    }

    /// Show the terminal UI instead of logging status lines
    pub fn tui(mut self, enabled: bool) -> Self {
        self.tui = enabled;
        self
    }

    pub fn status_interval(mut self, interval: Duration) -> Self {
        self.status_interval = interval;
        self
    }

    /// Play the session on the default output device until it ends
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let default_config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = self.engine.sample_rate();
        let channels = default_config.channels() as usize;
        let config = StreamConfig {
            channels: default_config.channels(),
            sample_rate: SampleRate(sample_rate),
            buffer_size: BufferSize::Default,
        };

        info!(
            "output: {} ({} channels at {} Hz)",
            device.name().unwrap_or_else(|_| "unknown device".into()),
            channels,
            sample_rate
        );

        let schedule = self.engine.schedule().clone();
        let state = Arc::new(PlaybackState::new());

        let (scope_tx, scope_rx) = if self.tui {
            let (tx, rx) = RingBuffer::<Frame>::new(SCOPE_RING_FRAMES);
            (Some(tx), Some(rx))
        } else {
            (None, None)
        };

        let stream = device
            .build_output_stream(
                &config,
                {
                    let mut engine = self.engine;
                    let mut scope_tx = scope_tx;
                    let state = state.clone();
                    let mut render_buf = vec![SILENCE; MAX_BLOCK_SIZE];
                    move |data: &mut [f32], _| {
                        fill_output(
                            data,
                            channels,
                            &mut engine,
                            &mut render_buf,
                            scope_tx.as_mut(),
                            &state,
                        );
                    }
                },
                move |err| error!("stream error: {err}"),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;

        match scope_rx {
            Some(scope_rx) => {
                let terminal = ratatui::init();
                let res = UiApp::new(scope_rx, schedule, state.clone(), sample_rate).run(terminal);
                ratatui::restore();
                res?;
            }
            None => {
                let reporter = spawn_reporter(schedule, state.clone(), sample_rate, self.status_interval);
                while !state.is_finished() {
                    thread::sleep(POLL);
                }
                if reporter.join().is_err() {
                    error!("status reporter panicked");
                }
            }
        }

        if state.is_finished() {
            thread::sleep(DRAIN);
            info!("playback finished");
        } else {
            info!("playback stopped at {:.2}s", state.elapsed(sample_rate));
        }

        Ok(())
    }
}

/// Render one device buffer from the engine.
///
/// Frames past end-of-data are written as silence and the shared state is
/// flagged as finished.
fn fill_output(
    data: &mut [f32],
    channels: usize,
    engine: &mut BinauralEngine,
    render_buf: &mut [Frame],
    mut scope_tx: Option<&mut Producer<Frame>>,
    state: &PlaybackState,
) {
    if channels == 0 {
        return;
    }

    let total_frames = data.len() / channels;
    let mut frames_written = 0;

    while frames_written < total_frames {
        let frames_to_render = (total_frames - frames_written).min(render_buf.len());
        let block = &mut render_buf[..frames_to_render];

        let produced = engine.render_block(block);
        block[produced..].fill(SILENCE);

        let out_off = frames_written * channels;
        for (i, frame) in block.iter().enumerate() {
            let start = out_off + i * channels;
            write_frame(&mut data[start..start + channels], *frame);
        }

        // Drop on overflow; the UI only needs recent frames
        if let Some(tx) = scope_tx.as_deref_mut() {
            for frame in &block[..produced] {
                if tx.push(*frame).is_err() {
                    break;
                }
            }
        }

        state.advance(produced as u64);
        if produced < frames_to_render {
            state.finish();
        }

        frames_written += frames_to_render;
    }
}

/// Write a stereo frame into one interleaved device frame.
fn write_frame(out: &mut [f32], [left, right]: Frame) {
    match out {
        [] => {}
        [mono] => *mono = 0.5 * (left + right),
        [l, r, rest @ ..] => {
            *l = left;
            *r = right;
            rest.fill(0.0);
        }
    }
}

/// Log the session status at start, every `interval`, and at the end.
fn spawn_reporter(
    schedule: Arc<Schedule>,
    state: Arc<PlaybackState>,
    sample_rate: u32,
    interval: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        info!("{}", schedule.status(0.0));

        let mut last_report = Instant::now();
        while !state.is_finished() {
            thread::sleep(POLL);
            if last_report.elapsed() >= interval {
                info!("{}", schedule.status(state.elapsed(sample_rate)));
                last_report = Instant::now();
            }
        }

        info!("{}", schedule.status(state.elapsed(sample_rate)));
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_frame_stereo() {
        let mut out = [9.0; 2];
        write_frame(&mut out, [0.25, -0.5]);
        assert_eq!(out, [0.25, -0.5]);
    }

    #[test]
    fn test_write_frame_mono_averages() {
        let mut out = [9.0; 1];
        write_frame(&mut out, [0.25, -0.5]);
        assert_eq!(out, [-0.125]);
    }

    #[test]
    fn test_write_frame_silences_extra_channels() {
        let mut out = [9.0; 6];
        write_frame(&mut out, [0.25, -0.5]);
        assert_eq!(out, [0.25, -0.5, 0.0, 0.0, 0.0, 0.0]);
    }
}
