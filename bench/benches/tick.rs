//! Benchmark core throughput using Criterion.
//!
//! These benchmarks measure what a run costs the host per frame:
//! - Path follower steps
//! - FPS statistics (record, percentiles)
//! - Full simulated runs over each scenario

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use flyby_bench::scenarios::{self, RandomWalkConfig, RandomWalkScenario, Scenario};
use flyby_bench::FrameProfile;
use flyby_engine::core::{ManualClock, SimLoop};
use flyby_engine::path::{self, Pose};
use flyby_engine::present::LogPresenter;
use flyby_engine::run::{BenchmarkRun, RotationMode, RunConfig};
use flyby_engine::sampler::{FixedProbe, FpsStats};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// =============================================================================
// Follower Benchmarks
// =============================================================================

fn bench_follower(c: &mut Criterion) {
    let mut group = c.benchmark_group("follower");

    let target = Pose::looking_at(Vec3::new(100.0, 20.0, -40.0), Vec3::ZERO);
    for (name, rotation) in [
        ("disabled", RotationMode::Disabled),
        ("per_tick", RotationMode::PerTick),
        ("time_corrected", RotationMode::TimeCorrected),
    ] {
        let config = RunConfig {
            rotation,
            ..RunConfig::moving(5.0)
        };
        group.bench_with_input(BenchmarkId::new("advance", name), &config, |b, config| {
            b.iter(|| path::advance(black_box(Pose::default()), target, config, 1.0 / 60.0));
        });
    }

    // Walk a whole route one step at a time.
    let route = RandomWalkScenario::with_config(RandomWalkConfig {
        waypoint_count: 64,
        ..Default::default()
    })
    .path();
    let config = RunConfig::moving(50.0);
    group.bench_function("step_route", |b| {
        b.iter(|| {
            let mut index = 1;
            let mut cursor = *route.first().unwrap();
            let mut steps = 0u32;
            while index < route.len() {
                path::step(&route, &mut index, &mut cursor, &config, 1.0 / 60.0);
                steps += 1;
            }
            black_box(steps)
        });
    });

    group.finish();
}

// =============================================================================
// Statistics Benchmarks
// =============================================================================

fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats");

    for count in [1_000, 10_000, 100_000] {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let readings: Vec<f32> = (0..count).map(|_| rng.gen_range(30.0..144.0)).collect();
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("record", count), &readings, |b, readings| {
            b.iter(|| {
                let mut stats = FpsStats::new();
                for fps in readings {
                    stats.record(*fps);
                }
                black_box(stats.average())
            });
        });

        let mut stats = FpsStats::new();
        for fps in &readings {
            stats.record(*fps);
        }
        group.bench_with_input(BenchmarkId::new("summary", count), &stats, |b, stats| {
            b.iter(|| black_box(stats.summary()));
        });
    }

    group.finish();
}

// =============================================================================
// Full Run Benchmarks
// =============================================================================

fn simulated_run(clock: &ManualClock) -> BenchmarkRun {
    BenchmarkRun::new(
        Box::new(clock.clone()),
        Box::new(FixedProbe::default()),
        Box::new(LogPresenter),
    )
}

fn bench_runs(c: &mut Criterion) {
    let mut group = c.benchmark_group("run");
    group.measurement_time(Duration::from_secs(10));

    for name in scenarios::NAMES {
        let Some(scenario) = scenarios::by_name(name) else {
            continue;
        };
        let path = scenario.path();
        let config = scenario.config();

        group.bench_function(BenchmarkId::new("scenario", name), |b| {
            b.iter(|| {
                let clock = ManualClock::new();
                let mut run = simulated_run(&clock);
                run.start(config.clone(), path.clone()).unwrap();
                let deltas = FrameProfile::constant(60.0).deltas(0);
                black_box(SimLoop::new().run_simulated(&mut run, &clock, deltas))
            });
        });
    }

    // Static runs exercise the deadline timer instead of the follower.
    group.bench_function("static_10s", |b| {
        b.iter(|| {
            let clock = ManualClock::new();
            let mut run = simulated_run(&clock);
            run.start(RunConfig::static_for(10.0), Default::default())
                .unwrap();
            let deltas = FrameProfile::Jittered {
                fps: 60.0,
                jitter: 0.2,
            }
            .deltas(7);
            black_box(SimLoop::new().run_simulated(&mut run, &clock, deltas))
        });
    });

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(benches, bench_follower, bench_stats, bench_runs);

criterion_main!(benches);
