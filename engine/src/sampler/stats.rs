use serde::Serialize;

/// Running frame-rate statistics for one run.
///
/// Keeps every sample in arrival order alongside running min/max/sum so the
/// aggregates are available in constant time on every tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FpsStats {
    samples: Vec<f32>,
    min: Option<f32>,
    max: Option<f32>,
    sum: f64,
    skipped: usize,
}

/// Final frame-rate aggregates. Only exists when at least one sample was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FpsSummary {
    pub min: f32,
    pub max: f32,
    pub average: f32,
    pub median: f32,
    /// FPS at the 1st percentile, i.e. the slow tail of the run.
    pub one_percent_low: f32,
}

impl FpsStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one instantaneous FPS reading.
    pub fn record(&mut self, fps: f32) {
        self.samples.push(fps);
        self.sum += f64::from(fps);
        self.min = Some(self.min.map_or(fps, |min| min.min(fps)));
        self.max = Some(self.max.map_or(fps, |max| max.max(fps)));
    }

    /// Count a tick whose delta could not produce a reading.
    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn min(&self) -> Option<f32> {
        self.min
    }

    pub fn max(&self) -> Option<f32> {
        self.max
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Mean FPS, `None` when nothing has been recorded.
    pub fn average(&self) -> Option<f32> {
        if self.samples.is_empty() {
            None
        } else {
            Some((self.sum / self.samples.len() as f64) as f32)
        }
    }

    /// Get a specific percentile (0-100) of the recorded readings.
    pub fn percentile(&self, p: usize) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        let mut sorted = self.samples.clone();
        sorted.sort_by(f32::total_cmp);
        let p = p.min(100);
        let index = (sorted.len() * p / 100).min(sorted.len() - 1);
        Some(sorted[index])
    }

    pub fn median(&self) -> Option<f32> {
        self.percentile(50)
    }

    pub fn summary(&self) -> Option<FpsSummary> {
        Some(FpsSummary {
            min: self.min?,
            max: self.max?,
            average: self.average()?,
            median: self.median()?,
            one_percent_low: self.percentile(1)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats_have_no_aggregates() {
        let stats = FpsStats::new();
        assert_eq!(stats.min(), None);
        assert_eq!(stats.max(), None);
        assert_eq!(stats.average(), None);
        assert_eq!(stats.summary(), None);
    }

    #[test]
    fn running_aggregates() {
        let mut stats = FpsStats::new();
        for fps in [60.0, 30.0, 90.0, 60.0] {
            stats.record(fps);
        }
        assert_eq!(stats.count(), 4);
        assert_eq!(stats.min(), Some(30.0));
        assert_eq!(stats.max(), Some(90.0));
        assert_eq!(stats.average(), Some(60.0));
        assert_eq!(stats.samples(), &[60.0, 30.0, 90.0, 60.0]);
    }

    #[test]
    fn percentiles_use_sorted_samples() {
        let mut stats = FpsStats::new();
        for fps in (1..=100).rev() {
            stats.record(fps as f32);
        }
        assert_eq!(stats.percentile(1), Some(2.0));
        assert_eq!(stats.median(), Some(51.0));
        assert_eq!(stats.percentile(100), Some(100.0));
        assert_eq!(stats.percentile(0), Some(1.0));
    }

    #[test]
    fn skipped_ticks_do_not_touch_aggregates() {
        let mut stats = FpsStats::new();
        stats.record(60.0);
        let before = stats.clone();
        stats.skip();
        assert_eq!(stats.skipped(), 1);
        assert_eq!(stats.count(), before.count());
        assert_eq!(stats.average(), before.average());
    }
}
