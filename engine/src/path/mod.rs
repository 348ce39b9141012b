//! Waypoint paths and the follower that walks them.
//!
//! A [`WaypointPath`] is an ordered list of [`Pose`]s. The observation point
//! starts on the first waypoint and travels toward each following one at a
//! fixed linear speed; see [`follower`] for the per-tick step.

pub mod follower;
mod pose;

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use follower::{Advance, Progress, advance, rotation_factor, step};
pub use pose::{Pose, move_towards};

/// Ordered sequence of poses the camera visits. Immutable during a run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaypointPath {
    waypoints: Vec<Pose>,
}

impl WaypointPath {
    pub fn new(waypoints: Vec<Pose>) -> Self {
        Self { waypoints }
    }

    /// Build a path from positions only; every waypoint gets identity rotation.
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        positions.into_iter().map(Pose::at).collect()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Pose> {
        self.waypoints.get(index)
    }

    pub fn first(&self) -> Option<&Pose> {
        self.waypoints.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pose> {
        self.waypoints.iter()
    }

    /// Distance of each leg between consecutive waypoints.
    pub fn leg_lengths(&self) -> impl Iterator<Item = f32> + '_ {
        self.waypoints
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
    }

    /// Total distance travelled when following the whole path.
    pub fn total_length(&self) -> f32 {
        self.leg_lengths().sum()
    }

    pub fn as_slice(&self) -> &[Pose] {
        &self.waypoints
    }
}

impl FromIterator<Pose> for WaypointPath {
    fn from_iter<T: IntoIterator<Item = Pose>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Pose>> for WaypointPath {
    fn from(waypoints: Vec<Pose>) -> Self {
        Self::new(waypoints)
    }
}
