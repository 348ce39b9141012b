//! Per-tick performance sampling.
//!
//! [`sample`] turns a frame delta into an instantaneous FPS reading, folds it
//! into the run's [`FpsStats`], and reads the memory probe right next to it.
//! The two measurements are independent: a failing probe never drops the FPS
//! reading, and a bad delta never skips the memory read.

mod memory;
mod stats;

use log::warn;

use crate::error::ProbeError;

pub use memory::{
    BYTES_PER_GIB, BYTES_PER_MIB, FixedProbe, MemoryProbe, MemorySnapshot, NullProbe, StatmProbe,
};
pub use stats::{FpsStats, FpsSummary};

/// Everything measured during one tick.
#[derive(Debug)]
pub struct FpsReading {
    /// Instantaneous FPS, `None` when the delta could not produce one.
    pub fps: Option<f32>,
    pub memory: Result<MemorySnapshot, ProbeError>,
}

/// Frames per second implied by a frame delta in seconds.
///
/// Zero, negative and non-finite deltas (a paused or first frame) have no
/// meaningful rate and yield `None`, as do deltas so small that the rate
/// overflows `f32`.
pub fn instantaneous_fps(delta: f32) -> Option<f32> {
    if !(delta.is_finite() && delta > 0.0) {
        return None;
    }
    Some(1.0 / delta).filter(|fps| fps.is_finite())
}

/// Sample one tick: record the FPS reading into `stats` and read `probe`.
pub fn sample(stats: &mut FpsStats, delta: f32, probe: &dyn MemoryProbe) -> FpsReading {
    let fps = instantaneous_fps(delta);
    match fps {
        Some(fps) => stats.record(fps),
        None => {
            warn!("Skipping FPS sample for unusable frame delta {delta}");
            stats.skip();
        }
    }

    FpsReading {
        fps,
        memory: probe.snapshot(),
    }
}
