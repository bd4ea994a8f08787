use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rustmaster::io::wav;
use rustmaster::loudness::meter;
use rustmaster::master::{self, MasteringParams};
use rustmaster::preset;

#[derive(Parser, Debug)]
#[command(name = "rustmaster")]
#[command(version)]
#[command(about = "An offline mastering chain with loudness targeting.")]
struct Args {
    #[arg(help = "Input WAV file")]
    input: PathBuf,
    #[arg(
        short,
        long,
        help = "Output WAV file (defaults to a timestamped name beside the input)"
    )]
    output: Option<PathBuf>,
    #[arg(long, help = "JSON file with mastering parameters (partial files allowed)")]
    params: Option<PathBuf>,
    #[arg(
        long,
        env = "TARGET_LUFS",
        help = "Target integrated loudness; enables the convergence loop"
    )]
    target_lufs: Option<f32>,
    #[arg(long, help = "Write the applied parameters to this JSON file")]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    info!("rustmaster v{}", env!("CARGO_PKG_VERSION"));

    let mut audio = wav::read_stereo(&args.input)
        .with_context(|| format!("failed to read '{}'", args.input.display()))?;
    info!(
        "loaded {} frames at {} Hz",
        audio.left.len(),
        audio.sample_rate
    );

    let params = match &args.params {
        Some(path) => preset::load(path)
            .with_context(|| format!("failed to load parameters from '{}'", path.display()))?,
        None => MasteringParams::default(),
    };

    let input_loudness = meter::measure(&audio.left, &audio.right, audio.sample_rate);
    info!("input loudness: {input_loudness:.2} LUFS");

    let outcome = master::master(
        &mut audio.left,
        &mut audio.right,
        audio.sample_rate,
        params,
        args.target_lufs,
    )?;

    if let Some(result) = &outcome.convergence {
        info!(
            "convergence: {:.2} LUFS after {} iterations (gain {:+.1} dB)",
            result.achieved_loudness, result.iterations, result.params.gain_adjustment_db
        );
    }

    let output_loudness = meter::measure(&audio.left, &audio.right, audio.sample_rate);
    info!("output loudness: {output_loudness:.2} LUFS");

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input));
    wav::write_stereo(&output, &audio.left, &audio.right, audio.sample_rate)
        .with_context(|| format!("failed to write '{}'", output.display()))?;
    info!("mastered file written to {}", output.display());

    if let Some(report) = &args.report {
        preset::save(report, &outcome.params)
            .with_context(|| format!("failed to write report '{}'", report.display()))?;
    }

    Ok(())
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let name = format!(
        "{stem}_mastered_{}.wav",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    input.with_file_name(name)
}
