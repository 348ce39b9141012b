//! Command line host for flyby.
//!
//! Flies a camera route from a JSON run file or a built-in scenario, prints a
//! live status line, and reports the FPS summary at the end. With
//! `--simulate <fps>` the run is driven from a simulated clock instead of wall
//! time, which makes results repeatable.

mod console;
mod logging;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use flyby_bench::FrameProfile;
use flyby_bench::scenarios;
use flyby_engine::core::{ManualClock, RunResult, SimLoop, SystemClock};
use flyby_engine::path::WaypointPath;
use flyby_engine::run::{BenchmarkRun, Mode, RunConfig, RunFile};
use flyby_engine::sampler::MemoryProbe;
use log::{LevelFilter, info};

use crate::console::ConsolePresenter;
use crate::logging::LogPump;

#[cfg(feature = "memory_profiling")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[derive(Parser)]
#[command(name = "flyby", version, about = "Camera flythrough performance benchmark")]
struct Cli {
    /// JSON run file with `config` and `path`. Overrides --scenario.
    run_file: Option<PathBuf>,
    /// Built-in route to fly when no run file is given.
    #[arg(long, default_value = "orbit")]
    scenario: String,
    /// Hold the camera still and measure for --duration seconds.
    #[arg(long = "static")]
    static_mode: bool,
    /// Static run duration in seconds.
    #[arg(long)]
    duration: Option<f32>,
    /// Camera speed in units per second.
    #[arg(long)]
    speed: Option<f32>,
    /// Drive the run from a simulated clock at this frame rate.
    #[arg(long, value_name = "FPS")]
    simulate: Option<f32>,
    /// Random frame time variation for simulated runs, as a fraction.
    #[arg(long, default_value_t = 0.0)]
    jitter: f32,
    /// RNG seed for simulated frame jitter.
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Cap real-time runs at this frame rate.
    #[arg(long, value_name = "FPS", conflicts_with = "simulate")]
    fps_cap: Option<f32>,
    /// Give up after this many frames.
    #[arg(long)]
    max_frames: Option<u64>,
    /// Minimum run time between status line redraws, in milliseconds.
    #[arg(long, default_value_t = 100)]
    refresh_ms: u64,
    /// Also write the summary as JSON to this file.
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,
    /// List built-in scenarios and exit.
    #[arg(long)]
    list_scenarios: bool,
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn load_run(&self) -> Result<(RunConfig, WaypointPath)> {
        let (mut config, path) = match &self.run_file {
            Some(file) => {
                let run = RunFile::load(file)
                    .with_context(|| format!("load run file {}", file.display()))?;
                (run.config, run.path)
            }
            None => {
                let scenario = scenarios::by_name(&self.scenario).with_context(|| {
                    format!(
                        "unknown scenario {:?}, expected one of {:?}",
                        self.scenario,
                        scenarios::NAMES
                    )
                })?;
                info!("Flying scenario {}: {}", scenario.name(), scenario.description());
                (scenario.config(), scenario.path())
            }
        };

        if self.static_mode {
            config.mode = Mode::Static;
        }
        if let Some(duration) = self.duration {
            config.static_duration_seconds = duration;
        }
        if let Some(speed) = self.speed {
            config.move_speed = speed;
        }
        Ok((config, path))
    }

    fn sim_loop(&self) -> SimLoop {
        let mut sim = SimLoop::new();
        if let Some(frames) = self.max_frames {
            sim = sim.with_max_frames(frames);
        }
        if let Some(fps) = self.fps_cap.filter(|fps| *fps > 0.0) {
            sim = sim.with_frame_cap(Duration::from_secs_f32(1.0 / fps));
        }
        sim
    }
}

#[cfg(feature = "memory_profiling")]
fn memory_probe() -> Box<dyn MemoryProbe> {
    Box::new(flyby_bench::DhatProbe::start())
}

#[cfg(not(feature = "memory_profiling"))]
fn memory_probe() -> Box<dyn MemoryProbe> {
    Box::new(flyby_engine::sampler::StatmProbe::new())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_scenarios {
        for name in scenarios::NAMES {
            if let Some(scenario) = scenarios::by_name(name) {
                println!("{:<12} {}", scenario.name(), scenario.description());
            }
        }
        return Ok(());
    }

    let pump = LogPump::install(cli.log_level())?;
    let result = fly(&cli);
    pump.finish();
    result
}

fn fly(cli: &Cli) -> Result<()> {
    let (config, path) = cli.load_run()?;
    let presenter = ConsolePresenter::stdout(Duration::from_millis(cli.refresh_ms));
    let sim = cli.sim_loop();

    let result = match cli.simulate {
        Some(fps) => {
            if !(fps.is_finite() && fps > 0.0) {
                bail!("--simulate needs a positive frame rate, got {fps}");
            }
            let clock = ManualClock::new();
            let mut run =
                BenchmarkRun::new(Box::new(clock.clone()), memory_probe(), Box::new(presenter));
            run.start(config, path)?;

            let profile = if cli.jitter > 0.0 {
                FrameProfile::Jittered {
                    fps,
                    jitter: cli.jitter,
                }
            } else {
                FrameProfile::constant(fps)
            };
            let result = sim.run_simulated(&mut run, &clock, profile.deltas(cli.seed));
            conclude(run, result)?
        }
        None => {
            let clock = SystemClock::new();
            let mut run = BenchmarkRun::new(Box::new(clock), memory_probe(), Box::new(presenter));
            run.start(config, path)?;
            let result = sim.run(&mut run, &clock, |_| {});
            conclude(run, result)?
        }
    };

    if let (Some(file), Some(summary)) = (&cli.json, result) {
        let json = serde_json::to_string_pretty(&summary)?;
        fs::write(file, json).with_context(|| format!("write summary to {}", file.display()))?;
        info!("Wrote summary to {}", file.display());
    }
    Ok(())
}

/// Close out a run the loop gave up on, and hand back its summary.
fn conclude(mut run: BenchmarkRun, result: RunResult) -> Result<Option<flyby_engine::RunSummary>> {
    match result {
        RunResult::Finished { frames } => info!("Run finished after {frames} frames"),
        RunResult::Stopped { frames } => {
            info!("Stopped after {frames} frames, summarising partial run");
            run.finish();
        }
        RunResult::NotRunning => bail!("run was not started"),
    }
    Ok(run.summary().cloned())
}
