use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use taxi_trips::{Config, Dataset, ManualClock, PlaybackState, Replay};

/// Plays a taxi replay headlessly and reports what would be drawn.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file; defaults are used for anything it leaves out.
    #[arg(short, long, value_name = "*.json")]
    config: Option<PathBuf>,
    /// Directory containing the data files, overriding the config.
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
    /// Maximum number of display refreshes to simulate.
    #[arg(short, long, default_value_t = 10_000)]
    frames: usize,
    /// Display refresh rate in Hz.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
    /// Scrub to this simulation time before playing.
    #[arg(long)]
    scrub: Option<f64>,
    /// Write the layers of the final frame to this file.
    #[arg(long, value_name = "*.json")]
    dump: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("failed running taxi-replay: {e:?}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }

    let dataset = Dataset::load(&config)?;
    let clock = ManualClock::new();
    let mut replay = Replay::from_config(dataset.routes, &clock, &config);
    if let Some(time) = args.scrub {
        replay.scrub(time);
    }

    let dt = 1.0 / args.fps;
    let report_every = (args.fps.round() as usize).max(1);
    let start = Instant::now();
    let mut frames = 0;
    while frames < args.frames {
        clock.advance(dt);
        replay.on_refresh();
        frames += 1;
        if frames % report_every == 0 {
            log::info!(
                "{} after {} frames: {} arcs",
                replay.label(),
                frames,
                replay.arcs().len()
            );
        }
        let finished =
            replay.state() == PlaybackState::Paused && !replay.player().resume_pending();
        if finished {
            break;
        }
    }
    let elapsed = start.elapsed();
    println!(
        "Played {} frames to {} in {:?} (avg. frame: {:?})",
        frames,
        replay.label(),
        elapsed,
        elapsed / frames.max(1) as u32,
    );

    if let Some(path) = &args.dump {
        let json = serde_json::to_string(&replay.layers())?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote layers to {}", path.display());
    }
    Ok(())
}
