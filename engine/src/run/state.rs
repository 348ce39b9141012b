use std::time::Duration;

use crate::core::time::Stopwatch;
use crate::path::{Pose, WaypointPath};
use crate::sampler::FpsStats;

use super::{Mode, RunConfig};

/// Mutable state of the run in flight.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunState {
    /// Index of the waypoint the camera is travelling toward.
    pub waypoint_index: usize,
    pub cursor: Pose,
    pub fps: FpsStats,
    pub stopwatch: Stopwatch,
    pub running: bool,
}

impl RunState {
    /// State of a run that has just started at `now`.
    ///
    /// A moving run begins on the first waypoint and heads for the second.
    pub fn begin(config: &RunConfig, path: &WaypointPath, now: Duration) -> Self {
        let (waypoint_index, cursor) = match (config.mode, path.first()) {
            (Mode::Moving, Some(first)) => (1, *first),
            (_, first) => (0, first.copied().unwrap_or_default()),
        };
        Self {
            waypoint_index,
            cursor,
            fps: FpsStats::new(),
            stopwatch: Stopwatch::started(now),
            running: true,
        }
    }
}
