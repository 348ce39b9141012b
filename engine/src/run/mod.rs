//! The benchmark run lifecycle.
//!
//! A [`BenchmarkRun`] moves through `Idle → Running(Moving | Static) →
//! Finished`. The host drives it with [`BenchmarkRun::tick`] once per frame:
//!
//! - **Moving**: the camera advances along the path, the frame is sampled,
//!   and the run finishes once the last waypoint is reached.
//! - **Static**: the frame is sampled only; a one-shot timer scheduled at
//!   start finishes the run after the configured duration.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use glam::Vec3;
//! use flyby_engine::core::time::ManualClock;
//! use flyby_engine::path::WaypointPath;
//! use flyby_engine::present::LogPresenter;
//! use flyby_engine::run::{BenchmarkRun, Phase, RunConfig};
//! use flyby_engine::sampler::FixedProbe;
//!
//! let clock = ManualClock::new();
//! let mut run = BenchmarkRun::new(
//!     Box::new(clock.clone()),
//!     Box::new(FixedProbe::new(0, 0)),
//!     Box::new(LogPresenter),
//! );
//! let path = WaypointPath::from_positions([Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]);
//! run.start(RunConfig::moving(5.0), path).unwrap();
//!
//! while run.phase().is_running() {
//!     clock.advance(Duration::from_secs(1));
//!     run.tick(1.0);
//! }
//! assert_eq!(run.summary().unwrap().duration_seconds, 2.0);
//! ```

mod config;
mod phase;
mod state;
mod summary;

use log::{debug, error, info, warn};

use crate::core::time::Clock;
use crate::core::timer::{TimerId, TimerQueue};
use crate::error::{ConfigError, RunError};
use crate::path::{self, Progress, WaypointPath};
use crate::present::{Diagnostic, Presenter, StatusUpdate};
use crate::sampler::{self, MemoryProbe};

pub use config::{Mode, RotationMode, RunConfig, RunFile};
pub use phase::Phase;
pub use state::RunState;
pub use summary::RunSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunEvent {
    StaticDeadline,
}

/// One benchmark run and its injected collaborators.
pub struct BenchmarkRun {
    phase: Phase,
    config: Option<RunConfig>,
    path: WaypointPath,
    state: RunState,
    summary: Option<RunSummary>,
    timers: TimerQueue<RunEvent>,
    deadline: Option<TimerId>,
    clock: Box<dyn Clock>,
    probe: Box<dyn MemoryProbe>,
    presenter: Box<dyn Presenter>,
}

impl BenchmarkRun {
    /// An idle run. Nothing is measured until [`start`](Self::start).
    pub fn new(
        clock: Box<dyn Clock>,
        probe: Box<dyn MemoryProbe>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        Self {
            phase: Phase::Idle,
            config: None,
            path: WaypointPath::default(),
            state: RunState::default(),
            summary: None,
            timers: TimerQueue::new(),
            deadline: None,
            clock,
            probe,
            presenter,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn config(&self) -> Option<&RunConfig> {
        self.config.as_ref()
    }

    pub fn path(&self) -> &WaypointPath {
        &self.path
    }

    /// Results of the last finished run.
    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    /// Number of scheduled timers that have not fired yet.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Start a run, discarding whatever state a previous run left behind.
    ///
    /// An invalid configuration leaves the run idle, is reported to the
    /// presenter as a diagnostic, and is returned.
    pub fn start(&mut self, config: RunConfig, path: WaypointPath) -> Result<(), RunError> {
        self.clear_timers();
        self.summary = None;
        self.path = path;

        if let Err(err) = config.validate(&self.path) {
            return self.reject(config, err);
        }

        let now = self.clock.now();
        let due = match config.mode {
            Mode::Static => match now.checked_add(config.static_duration()) {
                Some(due) => Some(due),
                None => {
                    let err = ConfigError::InvalidDuration(config.static_duration_seconds);
                    return self.reject(config, err);
                }
            },
            Mode::Moving => None,
        };

        self.state = RunState::begin(&config, &self.path, now);
        if let Some(due) = due {
            self.deadline = Some(self.timers.schedule_once(due, RunEvent::StaticDeadline));
            info!(
                "Starting static benchmark for {:.2} seconds",
                config.static_duration_seconds
            );
        } else {
            info!(
                "Starting moving benchmark over {} waypoints ({:.2} units)",
                self.path.len(),
                self.path.total_length()
            );
        }
        self.phase = Phase::Running(config.mode);
        self.config = Some(config);
        Ok(())
    }

    /// Advance the run by one frame of `delta` seconds. No-op unless running.
    ///
    /// Returns the phase after the tick.
    pub fn tick(&mut self, delta: f32) -> Phase {
        let Phase::Running(mode) = self.phase else {
            return self.phase;
        };

        match mode {
            Mode::Static => {
                self.sample(delta);
                self.poll();
            }
            Mode::Moving => {
                let progress = match self.config.as_ref() {
                    Some(config) => path::step(
                        &self.path,
                        &mut self.state.waypoint_index,
                        &mut self.state.cursor,
                        config,
                        delta,
                    ),
                    None => Progress::Complete,
                };
                if let Progress::Arrived { index } = progress {
                    debug!("Reached waypoint {index}");
                }
                self.sample(delta);
                if progress == Progress::Complete {
                    self.finish();
                }
            }
        }
        self.phase
    }

    /// Fire any timers that are due without sampling a frame.
    pub fn poll(&mut self) {
        let now = self.clock.now();
        if self.timers.next_due().is_none_or(|due| due > now) {
            return;
        }
        for event in self.timers.drain_due(now) {
            match event {
                RunEvent::StaticDeadline => {
                    self.deadline = None;
                    debug!("Static benchmark duration elapsed");
                    self.finish();
                }
            }
        }
    }

    /// Stop timing, compute and publish the summary. No-op unless running.
    pub fn finish(&mut self) -> Option<&RunSummary> {
        if !self.phase.is_running() {
            return None;
        }

        let now = self.clock.now();
        self.clear_timers();
        self.state.stopwatch.stop(now);
        self.state.running = false;
        self.phase = Phase::Finished;

        let summary = RunSummary::new(&self.state.fps, self.state.stopwatch.elapsed(now));
        info!(
            "Benchmark finished after {:.2} seconds with {} samples",
            summary.duration_seconds, summary.sample_count
        );
        self.presenter.summary(&summary);
        self.summary = Some(summary);
        self.summary.as_ref()
    }

    /// Start again with the last configuration and path.
    ///
    /// Pending timers from the previous run are cancelled first, so a stale
    /// static deadline can never finish the new run.
    pub fn restart(&mut self) -> Result<(), RunError> {
        let Some(config) = self.config.clone() else {
            return Err(RunError::NotConfigured);
        };
        let path = std::mem::take(&mut self.path);
        info!("Restarting benchmark");
        self.start(config, path)
    }

    /// Abandon the current run without publishing a summary.
    pub fn cancel(&mut self) {
        if self.phase.is_running() {
            warn!("Benchmark cancelled");
        }
        self.deadline = None;
        let dropped = self.timers.cancel_all();
        if dropped > 0 {
            debug!("Dropped {dropped} pending timers");
        }
        self.state = RunState::default();
        self.phase = Phase::Idle;
    }

    // Leave the run idle, keeping `config` so `restart` can retry it.
    fn reject(&mut self, config: RunConfig, err: ConfigError) -> Result<(), RunError> {
        error!("Refusing to start benchmark: {err}");
        self.phase = Phase::Idle;
        self.state = RunState::default();
        self.config = Some(config);
        self.presenter
            .diagnostic(&Diagnostic::Rejected(err.to_string()));
        Err(err.into())
    }

    fn clear_timers(&mut self) {
        if let Some(deadline) = self.deadline.take() {
            if self.timers.cancel(deadline) {
                debug!("Cancelled pending static deadline");
            }
        }
    }

    fn sample(&mut self, delta: f32) {
        let reading = sampler::sample(&mut self.state.fps, delta, self.probe.as_ref());
        let memory = match reading.memory {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!("Memory probe failed: {err}");
                self.presenter
                    .diagnostic(&Diagnostic::ProbeFailed(err.to_string()));
                None
            }
        };
        let status = StatusUpdate {
            fps: reading.fps,
            memory,
            elapsed: self.state.stopwatch.elapsed(self.clock.now()),
        };
        self.presenter.status(&status);
    }
}
