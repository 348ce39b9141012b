//! Error types for the benchmark core.
//!
//! Only configuration problems stop a run from starting. Everything that can
//! go wrong while ticking (a probe that cannot be read, a zero frame delta) is
//! recovered locally and surfaced as a log line or a
//! [`Diagnostic`](crate::present::Diagnostic).

use thiserror::Error;

/// A run configuration that cannot be started.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A moving run was started without any waypoints.
    #[error("camera path is empty; a moving run needs at least one waypoint")]
    EmptyPath,
    #[error("move speed must be finite and non-negative, got {0}")]
    InvalidSpeed(f32),
    #[error("arrival threshold must be finite and positive, got {0}")]
    InvalidThreshold(f32),
    #[error("static duration must be non-negative and in range, got {0}")]
    InvalidDuration(f32),
    #[error("rotation smoothness must be within [0, 1], got {0}")]
    InvalidSmoothness(f32),
}

/// Errors returned by the run lifecycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError {
    #[error("invalid run configuration: {0}")]
    Config(#[from] ConfigError),
    /// `restart` was called before any `start`.
    #[error("run has never been configured")]
    NotConfigured,
}

/// Failure reading a memory probe. Always treated as transient.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("memory probe unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read memory statistics: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed memory statistics: {0}")]
    Parse(String),
}

/// Failure loading a run description from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read run file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse run file: {0}")]
    Json(#[from] serde_json::Error),
}
