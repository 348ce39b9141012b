//! Engine-independent flythrough benchmark core.
//!
//! A [`BenchmarkRun`](run::BenchmarkRun) moves an observation point along a
//! waypoint path (or holds it still for a fixed time), samples frame rate and
//! memory usage on every tick, and publishes min/max/average FPS plus elapsed
//! time when the run ends.
//!
//! - [`path`]: waypoint paths and the per-tick follower
//! - [`sampler`]: FPS statistics and memory probes
//! - [`run`]: configuration, lifecycle, and summaries
//! - [`present`]: sinks for status lines, summaries, and diagnostics
//! - [`core`]: clocks, one-shot timers, host loops, and log plumbing
//!
//! The host owns the frame loop and calls
//! [`BenchmarkRun::tick`](run::BenchmarkRun::tick) once per frame; nothing in
//! this crate registers itself with an engine.

pub mod core;
pub mod error;
pub mod path;
pub mod present;
pub mod run;
pub mod sampler;

pub use error::{ConfigError, LoadError, ProbeError, RunError};
pub use run::{BenchmarkRun, Mode, Phase, RunConfig, RunSummary};
