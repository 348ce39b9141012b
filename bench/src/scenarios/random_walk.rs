//! Random walk scenario.
//!
//! Hops between seeded random points inside a box. The same seed always
//! yields the same route, so runs stay comparable across builds.

use flyby_engine::RunConfig;
use flyby_engine::path::{Pose, WaypointPath};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::scenarios::Scenario;

/// Configuration for the random walk scenario.
#[derive(Debug, Clone)]
pub struct RandomWalkConfig {
    pub waypoint_count: usize,
    /// Half extent of the box the walk stays inside.
    pub extent: f32,
    pub move_speed: f32,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for RandomWalkConfig {
    fn default() -> Self {
        Self {
            waypoint_count: 32,
            extent: 100.0,
            move_speed: 20.0,
            seed: 12345,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RandomWalkScenario {
    config: RandomWalkConfig,
}

impl RandomWalkScenario {
    pub fn with_config(config: RandomWalkConfig) -> Self {
        Self { config }
    }
}

impl Scenario for RandomWalkScenario {
    fn name(&self) -> &'static str {
        "random_walk"
    }

    fn description(&self) -> &'static str {
        "Seeded random hops inside a box, looking toward the origin"
    }

    fn path(&self) -> WaypointPath {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let extent = self.config.extent.abs().max(1.0);
        (0..self.config.waypoint_count.max(2))
            .map(|_| {
                let position = Vec3::new(
                    rng.gen_range(-extent..extent),
                    rng.gen_range(0.0..extent),
                    rng.gen_range(-extent..extent),
                );
                Pose::looking_at(position, Vec3::ZERO)
            })
            .collect()
    }

    fn config(&self) -> RunConfig {
        RunConfig::moving(self.config.move_speed)
    }
}
