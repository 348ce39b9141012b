//! Per-tick movement of the observation point along a [`WaypointPath`].

use super::{Pose, WaypointPath, move_towards};
use crate::run::{RotationMode, RunConfig};

/// Frame rate at which a per-tick smoothness factor is considered calibrated.
pub const REFERENCE_RATE: f32 = 60.0;

/// Result of a single [`advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advance {
    pub pose: Pose,
    pub arrived: bool,
}

/// Where the follower stands after a [`step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Still travelling toward the current waypoint.
    EnRoute,
    /// Reached the waypoint at `index`; more remain.
    Arrived { index: usize },
    /// Every waypoint has been visited.
    Complete,
}

/// Interpolation parameter used to rotate toward the target this tick.
///
/// `PerTick` applies the smoothness factor as is, which makes the turn rate
/// depend on frame rate. `TimeCorrected` rescales the factor so that it is
/// exact at [`REFERENCE_RATE`] and equivalent at every other rate.
pub fn rotation_factor(mode: RotationMode, smoothness: f32, delta: f32) -> f32 {
    let smoothness = smoothness.clamp(0.0, 1.0);
    match mode {
        RotationMode::Disabled => 0.0,
        RotationMode::PerTick => smoothness,
        RotationMode::TimeCorrected => {
            if !(delta > 0.0) {
                return 0.0;
            }
            1.0 - (1.0 - smoothness).powf(delta * REFERENCE_RATE)
        }
    }
}

/// Move `cursor` toward `target` for one tick of `delta` seconds.
///
/// Travel is capped at `move_speed × delta` and never overshoots. The cursor
/// has arrived once it is closer than the configured arrival threshold.
pub fn advance(cursor: Pose, target: Pose, config: &RunConfig, delta: f32) -> Advance {
    let max_distance = if delta.is_finite() {
        (config.move_speed * delta).max(0.0)
    } else {
        0.0
    };
    let position = move_towards(cursor.position, target.position, max_distance);

    let rotation = match config.rotation {
        RotationMode::Disabled => cursor.rotation,
        mode => {
            let t = rotation_factor(mode, config.rotation_smoothness, delta);
            cursor.rotation.slerp(target.rotation, t).normalize()
        }
    };

    let pose = Pose::new(position, rotation);
    Advance {
        pose,
        arrived: pose.position.distance(target.position) < config.arrival_threshold,
    }
}

/// Advance along `path`, bumping `index` when the current waypoint is reached.
///
/// Reports [`Progress::Complete`] once `index` has moved past the last
/// waypoint, including when it already was on entry.
pub fn step(
    path: &WaypointPath,
    index: &mut usize,
    cursor: &mut Pose,
    config: &RunConfig,
    delta: f32,
) -> Progress {
    let Some(target) = path.get(*index) else {
        return Progress::Complete;
    };

    let Advance { pose, arrived } = advance(*cursor, *target, config, delta);
    *cursor = pose;
    if !arrived {
        return Progress::EnRoute;
    }

    let reached = *index;
    *index += 1;
    if *index >= path.len() {
        Progress::Complete
    } else {
        Progress::Arrived { index: reached }
    }
}
