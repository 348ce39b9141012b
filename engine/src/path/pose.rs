use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and orientation of the observation point or of a waypoint.
///
/// Deserializes from `{"position": [x, y, z], "rotation": [x, y, z, w]}`;
/// `rotation` may be omitted and defaults to identity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    #[serde(default)]
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// A pose at `position` with identity rotation.
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// A pose at `position` facing `target` (negative Z forward, Y up).
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let forward = target - position;
        if forward.length_squared() <= f32::EPSILON {
            return Self::at(position);
        }
        let rotation = Quat::from_rotation_arc(Vec3::NEG_Z, forward.normalize());
        Self::new(position, rotation)
    }

    pub fn distance_to(&self, other: &Pose) -> f32 {
        self.position.distance(other.position)
    }
}

/// Move `current` toward `target` by at most `max_distance`, landing exactly
/// on `target` when it is within reach. Never overshoots.
pub fn move_towards(current: Vec3, target: Vec3, max_distance: f32) -> Vec3 {
    let max_distance = max_distance.max(0.0);
    let to_target = target - current;
    let distance = to_target.length();
    if distance <= max_distance || distance == 0.0 {
        target
    } else {
        current + to_target / distance * max_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_towards_limits_step() {
        let moved = move_towards(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 5.0);
        assert_eq!(moved, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn move_towards_snaps_when_in_reach() {
        let target = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(move_towards(Vec3::ZERO, target, 100.0), target);
    }

    #[test]
    fn move_towards_ignores_negative_distance() {
        let start = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(move_towards(start, Vec3::ZERO, -3.0), start);
    }

    #[test]
    fn looking_at_faces_target() {
        let pose = Pose::looking_at(Vec3::ZERO, Vec3::new(0.0, 0.0, -5.0));
        let forward = pose.rotation * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(Vec3::NEG_Z, 1e-5));

        let pose = Pose::looking_at(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0));
        let forward = pose.rotation * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn rotation_defaults_to_identity_when_omitted() {
        let pose: Pose = serde_json::from_str(r#"{"position": [1.0, 2.0, 3.0]}"#).unwrap();
        assert_eq!(pose, Pose::at(Vec3::new(1.0, 2.0, 3.0)));
    }
}
