//! binaural - play or export a binaural-beat session
//!
//! Run with: cargo run --bin binaural -- --config session.yaml

mod app;
mod state;
mod ui;

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use env_logger::Env;
use log::info;

use app::Player;
use binaural_dsp::{
    engine::{BinauralEngine, EngineConfig},
    io::{wav::write_wav, SessionFile},
    DEFAULT_SAMPLE_RATE,
};

/// Binaural beat and pink noise session player
#[derive(Parser, Debug)]
#[command(name = "binaural", version, about, long_about = None)]
struct Args {
    /// Session file with a `frequency_changes` list
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Write the session to this WAV file instead of playing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Multiply every breakpoint time by this factor
    #[arg(short, long, default_value_t = 1.0)]
    stretch: f64,

    /// Output sample rate in Hz
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Seed the pink noise for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Show the terminal UI during playback
    #[arg(long)]
    tui: bool,

    /// Seconds between status lines during playback
    #[arg(long, default_value_t = 3)]
    status_interval: u64,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let session = SessionFile::from_file(&args.config)
        .wrap_err_with(|| format!("failed to load session from {:?}", args.config))?;

    let config = EngineConfig {
        sample_rate: args.sample_rate,
        stretch: args.stretch,
        seed: args.seed,
    };
    let mut engine = BinauralEngine::new(session.into_breakpoints(), config)
        .wrap_err("failed to build session")?;

    info!(
        "session: {} breakpoints, {:.2}s at {} Hz",
        engine.schedule().breakpoints().len(),
        engine.total_duration(),
        engine.sample_rate()
    );

    match args.output {
        Some(path) => {
            info!("exporting to {:?}", path);
            let sample_rate = engine.sample_rate();
            write_wav(&path, &mut engine, sample_rate)
                .wrap_err_with(|| format!("failed to export {:?}", path))?;
            info!("export finished");
            Ok(())
        }
        None => Player::new(engine)
            .tui(args.tui)
            .status_interval(Duration::from_secs(args.status_interval.max(1)))
            .run(),
    }
}
