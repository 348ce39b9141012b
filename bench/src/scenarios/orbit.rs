//! Orbit scenario.
//!
//! Circles the origin at a fixed radius and altitude, looking at the centre
//! from every waypoint. The ring is closed: the last waypoint is the first.

use std::f32::consts::TAU;

use flyby_engine::RunConfig;
use flyby_engine::path::{Pose, WaypointPath};
use glam::Vec3;

use crate::scenarios::Scenario;

/// Configuration for the orbit scenario.
#[derive(Debug, Clone)]
pub struct OrbitConfig {
    pub radius: f32,
    pub altitude: f32,
    /// Waypoints on the ring, not counting the closing one.
    pub segments: usize,
    pub move_speed: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            radius: 50.0,
            altitude: 10.0,
            segments: 16,
            move_speed: 10.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrbitScenario {
    config: OrbitConfig,
}

impl OrbitScenario {
    pub fn with_config(config: OrbitConfig) -> Self {
        Self { config }
    }
}

impl Scenario for OrbitScenario {
    fn name(&self) -> &'static str {
        "orbit"
    }

    fn description(&self) -> &'static str {
        "Closed ring around the origin, always facing the centre"
    }

    fn path(&self) -> WaypointPath {
        let OrbitConfig {
            radius,
            altitude,
            segments,
            ..
        } = self.config;
        let segments = segments.max(3);
        let centre = Vec3::ZERO;
        (0..=segments)
            .map(|i| {
                let angle = TAU * i as f32 / segments as f32;
                let position = Vec3::new(radius * angle.cos(), altitude, radius * angle.sin());
                Pose::looking_at(position, centre)
            })
            .collect()
    }

    fn config(&self) -> RunConfig {
        RunConfig::moving(self.config.move_speed)
    }
}
