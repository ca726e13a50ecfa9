use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pulse_radar::monte_carlo::detection_rate;
use pulse_radar::rand::rngs::StdRng;
use pulse_radar::rand::SeedableRng;
use pulse_radar::{run_simulation, Loadable, RadarParameters, Result, Storable};

/// Single-pulse radar simulation against one moving target
#[derive(Parser, Debug)]
#[clap(version)]
struct Opts {
    /// JSON file with radar parameters, missing fields use defaults
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Seed for the clutter and noise generator
    #[clap(short, long, default_value = "0")]
    seed: u64,

    /// Directory to write result.json and spectrum.json into
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Also estimate the empirical detection rate over this many runs
    #[clap(short, long)]
    trials: Option<usize>,
}

fn run(opts: &Opts) -> Result<()> {
    let params = match &opts.config {
        Some(path) => RadarParameters::from_file(path)?,
        None => RadarParameters::default(),
    };

    let mut rng = StdRng::seed_from_u64(opts.seed);
    let result = run_simulation(&params, &mut rng)?;

    info!(
        target_detected = result.target_detected,
        detections = ?result.detection_indices(),
        "detection"
    );
    info!(
        theoretical_pd = result.theoretical_pd,
        doppler_shift_hz = result.doppler_shift_hz,
        max_range_meters = result.max_range_meters,
        "metrics"
    );

    if let Some(trials) = opts.trials {
        let rate = detection_rate(&params, trials, opts.seed)?;
        info!(trials, rate, theoretical_pd = result.theoretical_pd, "monte carlo");
    }

    if let Some(dir) = &opts.output {
        std::fs::create_dir_all(dir)?;
        result.to_file(&dir.join("result.json"))?;
        result.received_spectrum().to_file(&dir.join("spectrum.json"))?;
        info!(dir = %dir.display(), "results written");
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts = Opts::parse();

    if let Err(e) = run(&opts) {
        error!("{}", e);
        process::exit(1);
    }
}
