//! Deterministic flythrough scenarios.
//!
//! Each scenario builds a waypoint path and a run configuration, so the same
//! camera route can be replayed across builds and compared.
//!
//! # Scenarios
//!
//! - **Orbit**: a closed ring around the scene, constant altitude
//! - **Sweep**: a lawnmower pattern covering a rectangular area
//! - **Random walk**: seeded random hops inside a bounding box

pub mod orbit;
pub mod random_walk;
pub mod sweep;

pub use orbit::{OrbitConfig, OrbitScenario};
pub use random_walk::{RandomWalkConfig, RandomWalkScenario};
pub use sweep::{SweepConfig, SweepScenario};

use flyby_engine::RunConfig;
use flyby_engine::path::WaypointPath;

/// Common trait for flythrough scenarios.
pub trait Scenario {
    /// Human-readable name of the scenario.
    fn name(&self) -> &'static str;

    /// Brief description of the route.
    fn description(&self) -> &'static str;

    /// The waypoints the camera visits, in order.
    fn path(&self) -> WaypointPath;

    /// Run configuration the scenario is meant to be flown with.
    fn config(&self) -> RunConfig;
}

/// Look up a scenario by name with its default configuration.
pub fn by_name(name: &str) -> Option<Box<dyn Scenario>> {
    match name {
        "orbit" => Some(Box::new(OrbitScenario::default())),
        "sweep" => Some(Box::new(SweepScenario::default())),
        "random_walk" | "random-walk" => Some(Box::new(RandomWalkScenario::default())),
        _ => None,
    }
}

/// Names accepted by [`by_name`].
pub const NAMES: [&str; 3] = ["orbit", "sweep", "random_walk"];
