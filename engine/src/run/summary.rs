use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::sampler::{FpsStats, FpsSummary};

/// Final results of a run, computed once when it finishes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub duration_seconds: f64,
    pub sample_count: usize,
    /// Ticks whose delta could not produce an FPS reading.
    pub skipped_ticks: usize,
    /// `None` when the run finished without a single FPS reading.
    pub fps: Option<FpsSummary>,
}

impl RunSummary {
    pub fn new(stats: &FpsStats, duration: Duration) -> Self {
        Self {
            duration_seconds: duration.as_secs_f64(),
            sample_count: stats.count(),
            skipped_ticks: stats.skipped(),
            fps: stats.summary(),
        }
    }

    pub fn min_fps(&self) -> Option<f32> {
        self.fps.map(|fps| fps.min)
    }

    pub fn max_fps(&self) -> Option<f32> {
        self.fps.map(|fps| fps.max)
    }

    pub fn avg_fps(&self) -> Option<f32> {
        self.fps.map(|fps| fps.average)
    }

    pub fn has_data(&self) -> bool {
        self.fps.is_some()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Benchmark Completed")?;
        match &self.fps {
            Some(fps) => {
                writeln!(f, "Min FPS: {:.2}", fps.min)?;
                writeln!(f, "Max FPS: {:.2}", fps.max)?;
                writeln!(f, "Average FPS: {:.2}", fps.average)?;
                writeln!(f, "1% Low FPS: {:.2}", fps.one_percent_low)?;
            }
            None => writeln!(f, "FPS: no data")?,
        }
        write!(f, "Duration: {:.2} seconds", self.duration_seconds)
    }
}
