use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LoadError};
use crate::path::WaypointPath;

/// Whether the camera moves along the path or holds still for a fixed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Ends once every waypoint has been visited.
    #[default]
    Moving,
    /// Ends after `static_duration_seconds`.
    Static,
}

/// How the camera's orientation follows the waypoint orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    /// Keep the starting orientation.
    Disabled,
    /// Slerp by the raw smoothness factor each tick. Turn rate varies with frame rate.
    PerTick,
    /// Slerp by a factor rescaled for the tick's delta.
    #[default]
    TimeCorrected,
}

/// Tunables for one run. Read-only once the run has started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub mode: Mode,
    /// Linear speed in units per second.
    pub move_speed: f32,
    pub rotation: RotationMode,
    /// Interpolation factor in `[0, 1]`, calibrated per tick at 60 FPS.
    pub rotation_smoothness: f32,
    pub static_duration_seconds: f32,
    /// Distance under which a waypoint counts as reached.
    pub arrival_threshold: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Moving,
            move_speed: 5.0,
            rotation: RotationMode::TimeCorrected,
            rotation_smoothness: 0.1,
            static_duration_seconds: 30.0,
            arrival_threshold: 0.1,
        }
    }
}

impl RunConfig {
    /// A moving run at `move_speed` units per second.
    pub fn moving(move_speed: f32) -> Self {
        Self {
            mode: Mode::Moving,
            move_speed,
            ..Self::default()
        }
    }

    /// A static run lasting `seconds`.
    pub fn static_for(seconds: f32) -> Self {
        Self {
            mode: Mode::Static,
            static_duration_seconds: seconds,
            ..Self::default()
        }
    }

    /// The static duration as a `Duration`, saturating at the representable range.
    pub fn static_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.static_duration_seconds.max(0.0)).unwrap_or(Duration::MAX)
    }

    /// Check the tunables, and for a moving run that `path` has waypoints.
    pub fn validate(&self, path: &WaypointPath) -> Result<(), ConfigError> {
        match self.mode {
            Mode::Moving => {
                if path.is_empty() {
                    return Err(ConfigError::EmptyPath);
                }
                if !self.move_speed.is_finite() || self.move_speed < 0.0 {
                    return Err(ConfigError::InvalidSpeed(self.move_speed));
                }
                if !self.arrival_threshold.is_finite() || self.arrival_threshold <= 0.0 {
                    return Err(ConfigError::InvalidThreshold(self.arrival_threshold));
                }
                if !(0.0..=1.0).contains(&self.rotation_smoothness) {
                    return Err(ConfigError::InvalidSmoothness(self.rotation_smoothness));
                }
            }
            Mode::Static => {
                let seconds = self.static_duration_seconds;
                if !seconds.is_finite() || seconds < 0.0 || Duration::try_from_secs_f32(seconds).is_err() {
                    return Err(ConfigError::InvalidDuration(seconds));
                }
            }
        }
        Ok(())
    }
}

/// A run description as stored on disk: tunables plus the camera path.
///
/// ```json
/// {
///   "config": { "mode": "moving", "move_speed": 5.0 },
///   "path": [
///     { "position": [0.0, 0.0, 0.0] },
///     { "position": [10.0, 0.0, 0.0] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunFile {
    pub config: RunConfig,
    pub path: WaypointPath,
}

impl RunFile {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn two_points() -> WaypointPath {
        WaypointPath::from_positions([Vec3::ZERO, Vec3::X])
    }

    #[test]
    fn defaults_match_component_tunables() {
        let config = RunConfig::default();
        assert_eq!(config.mode, Mode::Moving);
        assert_eq!(config.move_speed, 5.0);
        assert_eq!(config.static_duration_seconds, 30.0);
        assert_eq!(config.arrival_threshold, 0.1);
        assert_eq!(config.rotation, RotationMode::TimeCorrected);
    }

    #[test]
    fn moving_run_needs_waypoints() {
        let config = RunConfig::moving(5.0);
        assert_eq!(
            config.validate(&WaypointPath::default()),
            Err(ConfigError::EmptyPath)
        );
        assert_eq!(config.validate(&two_points()), Ok(()));
    }

    #[test]
    fn static_run_ignores_path() {
        let config = RunConfig::static_for(5.0);
        assert_eq!(config.validate(&WaypointPath::default()), Ok(()));
        assert_eq!(config.static_duration(), Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_tunables() {
        let path = two_points();
        assert_eq!(
            RunConfig::moving(-1.0).validate(&path),
            Err(ConfigError::InvalidSpeed(-1.0))
        );
        let config = RunConfig {
            arrival_threshold: 0.0,
            ..RunConfig::default()
        };
        assert_eq!(config.validate(&path), Err(ConfigError::InvalidThreshold(0.0)));
        let config = RunConfig {
            rotation_smoothness: 1.5,
            ..RunConfig::default()
        };
        assert_eq!(config.validate(&path), Err(ConfigError::InvalidSmoothness(1.5)));
        assert!(RunConfig::static_for(f32::NAN).validate(&path).is_err());
    }

    #[test]
    fn rejects_static_duration_beyond_duration_range() {
        let empty = WaypointPath::default();
        assert_eq!(
            RunConfig::static_for(1e20).validate(&empty),
            Err(ConfigError::InvalidDuration(1e20))
        );
        assert_eq!(
            RunConfig::static_for(f32::MAX).validate(&empty),
            Err(ConfigError::InvalidDuration(f32::MAX))
        );
        // Large but representable durations still pass.
        let long = RunConfig::static_for(1e9);
        assert_eq!(long.validate(&empty), Ok(()));
        assert_eq!(long.static_duration(), Duration::from_secs(1_000_000_000));
        // Out-of-range values saturate instead of panicking.
        assert_eq!(RunConfig::static_for(1e20).static_duration(), Duration::MAX);
    }

    #[test]
    fn partial_run_file_uses_defaults() {
        let file = RunFile::from_json(
            r#"{
                "config": { "mode": "static", "static_duration_seconds": 12.5 }
            }"#,
        )
        .unwrap();
        assert_eq!(file.config.mode, Mode::Static);
        assert_eq!(file.config.static_duration_seconds, 12.5);
        assert_eq!(file.config.move_speed, 5.0);
        assert!(file.path.is_empty());
    }

    #[test]
    fn malformed_run_file_is_json_error() {
        assert!(matches!(
            RunFile::from_json("{ not json"),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn loads_run_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("run.json");
        std::fs::write(
            &file,
            r#"{"config": {"move_speed": 2.0}, "path": [{"position": [1.0, 2.0, 3.0]}]}"#,
        )
        .unwrap();
        let run = RunFile::load(&file).unwrap();
        assert_eq!(run.config.move_speed, 2.0);
        assert_eq!(run.path.len(), 1);
    }
}
