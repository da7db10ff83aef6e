//! sbg2yaml - convert an sbagen sequence into a binaural session file
//!
//! Run with: cargo run --bin sbg2yaml -- --input session.sbg --output config.yaml

use std::{fs, path::PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use env_logger::Env;
use log::info;

use binaural_dsp::io::sbagen::convert_to_session;

/// Convert sbagen tone-set/time-sequence files to YAML
#[derive(Parser, Debug)]
#[command(name = "sbg2yaml", version, about, long_about = None)]
struct Args {
    /// Path to the sbagen input file
    #[arg(short, long)]
    input: PathBuf,

    /// Path to the YAML output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let text = fs::read_to_string(&args.input)
        .wrap_err_with(|| format!("failed to read {:?}", args.input))?;
    let session = convert_to_session(&text)
        .wrap_err_with(|| format!("failed to convert {:?}", args.input))?;

    match args.output {
        Some(path) => {
            session
                .save_to_file(&path)
                .wrap_err_with(|| format!("failed to write {:?}", path))?;
            info!(
                "wrote {} breakpoints to {:?}",
                session.breakpoints().len(),
                path
            );
        }
        None => print!("{}", session.to_yaml_string()?),
    }

    Ok(())
}
