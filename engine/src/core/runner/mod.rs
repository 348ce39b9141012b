//! Host loops that drive a [`BenchmarkRun`](crate::run::BenchmarkRun) to completion.
//!
//! The run itself never owns a loop; these helpers are for hosts that do not
//! already have one, such as the CLI or the benchmarks.

mod looped;

/// Outcome of driving a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunResult {
    /// The run reached `Finished` after `frames` ticks.
    Finished { frames: u64 },
    /// The loop gave up (frame limit, stop handle, no more deltas) first.
    Stopped { frames: u64 },
    /// The run was not running to begin with.
    NotRunning,
}

pub use looped::SimLoop;
