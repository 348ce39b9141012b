use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::info;

use crate::core::runner::RunResult;
use crate::core::time::{Clock, ManualClock, Time};
use crate::run::BenchmarkRun;

/// A host loop ticking a run until it finishes.
///
/// In real time the loop measures each frame's delta from a [`Clock`] and
/// optionally sleeps to cap the frame rate. In simulation it advances a
/// [`ManualClock`] by a supplied sequence of deltas so results are fully
/// deterministic.
pub struct SimLoop {
    max_frames: Option<u64>,
    frame_cap: Option<Duration>,
    stop_handle: Arc<AtomicBool>,
}

impl SimLoop {
    pub fn new() -> Self {
        Self {
            max_frames: None,
            frame_cap: None,
            stop_handle: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Give up after `frames` ticks even if the run has not finished.
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Sleep so that real-time frames take at least `frame_time`.
    pub fn with_frame_cap(mut self, frame_time: Duration) -> Self {
        self.frame_cap = Some(frame_time);
        self
    }

    /// Flag that ends the loop at the next frame boundary when set.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_handle)
    }

    fn should_stop(&self, frames: u64) -> bool {
        if self.stop_handle.load(Ordering::Relaxed) {
            info!("Ending benchmark loop due to stop handle");
            return true;
        }
        self.max_frames.is_some_and(|max| frames >= max)
    }

    /// Drive `run` from wall time. `frame_fn` stands in for the host's frame
    /// work and is called before each tick.
    pub fn run<F>(&self, run: &mut BenchmarkRun, clock: &dyn Clock, mut frame_fn: F) -> RunResult
    where
        F: FnMut(&Time),
    {
        if !run.phase().is_running() {
            return RunResult::NotRunning;
        }

        let mut time = Time::new(clock);
        let mut frames = 0;
        loop {
            if self.should_stop(frames) {
                return RunResult::Stopped { frames };
            }

            frame_fn(&time);
            if let Some(cap) = self.frame_cap {
                let spent = time.next(clock).delta;
                if spent < cap {
                    std::thread::sleep(cap - spent);
                }
            }
            time = time.next(clock);
            frames += 1;
            if run.tick(time.delta_seconds()).is_finished() {
                return RunResult::Finished { frames };
            }
        }
    }

    /// Drive `run` from a simulated clock, one tick per supplied delta.
    pub fn run_simulated<I>(&self, run: &mut BenchmarkRun, clock: &ManualClock, deltas: I) -> RunResult
    where
        I: IntoIterator<Item = Duration>,
    {
        if !run.phase().is_running() {
            return RunResult::NotRunning;
        }

        let mut frames = 0;
        for delta in deltas {
            if self.should_stop(frames) {
                return RunResult::Stopped { frames };
            }
            clock.advance(delta);
            frames += 1;
            if run.tick(delta.as_secs_f32()).is_finished() {
                return RunResult::Finished { frames };
            }
        }
        RunResult::Stopped { frames }
    }
}

impl Default for SimLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::WaypointPath;
    use crate::present::LogPresenter;
    use crate::run::{Phase, RunConfig};
    use crate::sampler::FixedProbe;
    use glam::Vec3;
    use std::iter;

    fn simulated_run(clock: &ManualClock) -> BenchmarkRun {
        BenchmarkRun::new(
            Box::new(clock.clone()),
            Box::new(FixedProbe::default()),
            Box::new(LogPresenter),
        )
    }

    #[test]
    fn simulated_loop_runs_static_benchmark_to_completion() {
        let clock = ManualClock::new();
        let mut run = simulated_run(&clock);
        run.start(RunConfig::static_for(1.0), WaypointPath::default())
            .unwrap();

        let step = Duration::from_nanos(crate::core::time::SIXTY_FPS);
        let result = SimLoop::new().run_simulated(&mut run, &clock, iter::repeat(step));
        assert!(matches!(result, RunResult::Finished { frames } if frames >= 60));
        assert!(run.summary().unwrap().duration_seconds >= 1.0);
    }

    #[test]
    fn simulated_loop_respects_frame_limit() {
        let clock = ManualClock::new();
        let mut run = simulated_run(&clock);
        run.start(RunConfig::static_for(60.0), WaypointPath::default())
            .unwrap();
        let result = SimLoop::new().with_max_frames(10).run_simulated(
            &mut run,
            &clock,
            iter::repeat(Duration::from_millis(10)),
        );
        assert_eq!(result, RunResult::Stopped { frames: 10 });
        assert_eq!(run.phase(), Phase::Running(crate::run::Mode::Static));
    }

    #[test]
    fn stop_handle_ends_loop() {
        let clock = ManualClock::new();
        let mut run = simulated_run(&clock);
        run.start(RunConfig::static_for(60.0), WaypointPath::default())
            .unwrap();
        let sim = SimLoop::new();
        sim.stop_handle().store(true, Ordering::Relaxed);
        let result = sim.run_simulated(&mut run, &clock, iter::repeat(Duration::from_millis(10)));
        assert_eq!(result, RunResult::Stopped { frames: 0 });
    }

    #[test]
    fn idle_run_is_not_driven() {
        let clock = ManualClock::new();
        let mut run = simulated_run(&clock);
        let result = SimLoop::new().run(&mut run, &clock, |_| {});
        assert_eq!(result, RunResult::NotRunning);
        assert_eq!(
            SimLoop::new().run_simulated(&mut run, &clock, iter::repeat(Duration::from_millis(16))),
            RunResult::NotRunning
        );
    }

    #[test]
    fn real_time_loop_finishes_moving_run() {
        let clock = crate::core::time::SystemClock::new();
        let mut run = BenchmarkRun::new(
            Box::new(clock),
            Box::new(FixedProbe::default()),
            Box::new(LogPresenter),
        );
        let path = WaypointPath::from_positions([Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0)]);
        run.start(RunConfig::moving(50.0), path).unwrap();

        let mut frames_seen = 0;
        let result = SimLoop::new()
            .with_frame_cap(Duration::from_millis(2))
            .with_max_frames(10_000)
            .run(&mut run, &clock, |_| frames_seen += 1);
        assert!(matches!(result, RunResult::Finished { .. }));
        assert!(frames_seen > 0);
    }
}
