//! Sweep scenario.
//!
//! Flies a lawnmower pattern over a rectangle: down one lane, across, back up
//! the next. Long straight legs with sharp turns stress rotation smoothing.

use flyby_engine::RunConfig;
use flyby_engine::path::{Pose, WaypointPath};
use glam::Vec3;

use crate::scenarios::Scenario;

/// Configuration for the sweep scenario.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub width: f32,
    pub depth: f32,
    pub lanes: usize,
    pub altitude: f32,
    pub move_speed: f32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            depth: 100.0,
            lanes: 5,
            altitude: 20.0,
            move_speed: 15.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SweepScenario {
    config: SweepConfig,
}

impl SweepScenario {
    pub fn with_config(config: SweepConfig) -> Self {
        Self { config }
    }
}

impl Scenario for SweepScenario {
    fn name(&self) -> &'static str {
        "sweep"
    }

    fn description(&self) -> &'static str {
        "Lawnmower pattern over a rectangle, facing the direction of travel"
    }

    fn path(&self) -> WaypointPath {
        let SweepConfig {
            width,
            depth,
            lanes,
            altitude,
            ..
        } = self.config;
        let lanes = lanes.max(1);
        let spacing = if lanes > 1 {
            width / (lanes - 1) as f32
        } else {
            0.0
        };
        let half_depth = depth / 2.0;
        let left = -width / 2.0;

        let mut positions = Vec::with_capacity(lanes * 2);
        for lane in 0..lanes {
            let x = left + spacing * lane as f32;
            let (from, to) = if lane % 2 == 0 {
                (-half_depth, half_depth)
            } else {
                (half_depth, -half_depth)
            };
            positions.push(Vec3::new(x, altitude, from));
            positions.push(Vec3::new(x, altitude, to));
        }

        // Each waypoint faces the next one; the last keeps the final heading.
        let mut poses: Vec<Pose> = positions
            .windows(2)
            .map(|pair| Pose::looking_at(pair[0], pair[1]))
            .collect();
        if let Some(last) = poses.last().copied() {
            poses.push(Pose::new(positions[positions.len() - 1], last.rotation));
        }
        WaypointPath::new(poses)
    }

    fn config(&self) -> RunConfig {
        RunConfig::moving(self.config.move_speed)
    }
}
