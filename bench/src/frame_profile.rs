//! Synthetic frame timings for simulated runs.
//!
//! A [`FrameProfile`] stands in for the host's rendering cost: it yields the
//! delta of each frame so a run can be driven from a
//! [`ManualClock`](flyby_engine::core::ManualClock) with a repeatable mix of
//! steady, noisy and stalling frames.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Shape of the frame times fed to a simulated run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameProfile {
    /// Every frame takes exactly `1 / fps` seconds.
    Constant { fps: f32 },
    /// Frames vary uniformly by up to `jitter` (a fraction) around `1 / fps`.
    Jittered { fps: f32, jitter: f32 },
    /// Steady frames with one frame every `every` taking `factor` times longer.
    Spiky { fps: f32, every: u32, factor: f32 },
}

impl FrameProfile {
    pub fn constant(fps: f32) -> Self {
        Self::Constant { fps }
    }

    /// Nominal frame rate before jitter or spikes.
    pub fn fps(&self) -> f32 {
        match *self {
            Self::Constant { fps } | Self::Jittered { fps, .. } | Self::Spiky { fps, .. } => fps,
        }
    }

    /// Endless, seeded stream of frame deltas.
    pub fn deltas(&self, seed: u64) -> FrameDeltas {
        FrameDeltas {
            profile: *self,
            rng: ChaCha8Rng::seed_from_u64(seed),
            frame: 0,
        }
    }
}

impl Default for FrameProfile {
    fn default() -> Self {
        Self::constant(60.0)
    }
}

/// Iterator over the deltas of a [`FrameProfile`].
pub struct FrameDeltas {
    profile: FrameProfile,
    rng: ChaCha8Rng,
    frame: u64,
}

impl Iterator for FrameDeltas {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let nominal = 1.0 / self.profile.fps().max(f32::EPSILON);
        let seconds = match self.profile {
            FrameProfile::Constant { .. } => nominal,
            FrameProfile::Jittered { jitter, .. } => {
                let jitter = jitter.clamp(0.0, 0.99);
                if jitter > 0.0 {
                    nominal * (1.0 + self.rng.gen_range(-jitter..jitter))
                } else {
                    nominal
                }
            }
            FrameProfile::Spiky { every, factor, .. } => {
                if every > 0 && (self.frame + 1) % u64::from(every) == 0 {
                    nominal * factor.max(1.0)
                } else {
                    nominal
                }
            }
        };
        self.frame += 1;
        Some(Duration::from_secs_f32(seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_profile_repeats_nominal_delta() {
        let deltas: Vec<_> = FrameProfile::constant(50.0).deltas(0).take(3).collect();
        assert_eq!(deltas.len(), 3);
        assert!(deltas.iter().all(|delta| *delta == deltas[0]));
        assert!((deltas[0].as_secs_f32() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn jittered_profile_stays_in_band_and_is_seeded() {
        let profile = FrameProfile::Jittered {
            fps: 100.0,
            jitter: 0.5,
        };
        let first: Vec<_> = profile.deltas(7).take(100).collect();
        let second: Vec<_> = profile.deltas(7).take(100).collect();
        assert_eq!(first, second);
        for delta in first {
            let ms = delta.as_secs_f32() * 1000.0;
            assert!((5.0 - 1e-3..=15.0 + 1e-3).contains(&ms), "{ms}");
        }
    }

    #[test]
    fn spiky_profile_stalls_on_schedule() {
        let profile = FrameProfile::Spiky {
            fps: 100.0,
            every: 4,
            factor: 10.0,
        };
        let deltas: Vec<_> = profile.deltas(0).take(8).collect();
        let long: Vec<_> = deltas
            .iter()
            .enumerate()
            .filter(|(_, delta)| delta.as_secs_f32() > 0.05)
            .map(|(index, _)| index)
            .collect();
        assert_eq!(long, vec![3, 7]);
    }
}
