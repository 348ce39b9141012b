use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Nanoseconds in one frame at 60 frames per second.
pub const SIXTY_FPS: u64 = 16_666_666;

/// A monotonic time source. Runs never read wall time directly; everything
/// goes through a `Clock` so hosts can drive a run from simulated time.
pub trait Clock {
    /// Time elapsed since the clock's origin. Must never go backwards.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A simulated clock advanced explicitly by the host.
///
/// Clones share the same underlying time, so a host can hand one clone to a
/// run and keep another to advance it between ticks.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.nanos
            .fetch_add(by.as_nanos() as u64, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Relaxed))
    }
}

/// A Time represents a specific amount of time elapsed within a host loop for a single frame.
/// Each frame captures total elapsed time as well as the delta time since the last frame. New
/// frames are generated from a previous frame using `next()`, once per iteration of the loop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Time {
    // The clock reading when this frame was created
    last: Duration,
    /// The time delta since the last frame
    pub delta: Duration,
    /// The total elapsed time since the first frame
    pub time: Duration,
    /// Number of frames produced so far
    pub frame: u64,
}

impl Time {
    /// Construct the first frame with delta and time set to `0`.
    pub fn new(clock: &dyn Clock) -> Self {
        Self {
            last: clock.now(),
            delta: Duration::ZERO,
            time: Duration::ZERO,
            frame: 0,
        }
    }

    /// Create the next frame from an existing frame, capturing the delta since the last one.
    pub fn next(self, clock: &dyn Clock) -> Self {
        let now = clock.now();
        let delta = now.saturating_sub(self.last);
        Self {
            last: now,
            delta,
            time: self.time + delta,
            frame: self.frame + 1,
        }
    }

    /// The frame delta in seconds, as consumed by [`BenchmarkRun::tick`](crate::run::BenchmarkRun::tick).
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

/// Measures the elapsed duration of a run against an external clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stopwatch {
    started_at: Option<Duration>,
    accumulated: Duration,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stopwatch already running from `now`.
    pub fn started(now: Duration) -> Self {
        let mut watch = Self::new();
        watch.start(now);
        watch
    }

    /// Start timing. No effect if already running.
    pub fn start(&mut self, now: Duration) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Stop timing, folding the running span into the accumulated total.
    pub fn stop(&mut self, now: Duration) {
        if let Some(started_at) = self.started_at.take() {
            self.accumulated += now.saturating_sub(started_at);
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Total measured time, including the current span if running.
    pub fn elapsed(&self, now: Duration) -> Duration {
        let running = self
            .started_at
            .map_or(Duration::ZERO, |started_at| now.saturating_sub(started_at));
        self.accumulated + running
    }
}
