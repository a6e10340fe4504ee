//! Sky animation phase and derived cloud positions.
//!
//! The phase only moves forward. Cloud x-coordinates wrap against the
//! container width, not against any domain timer.

use serde::Serialize;

use super::sparkline::Point;

/// Number of clouds drifting across the sky.
pub const CLOUD_COUNT: usize = 5;

/// Horizontal pixels travelled per unit of phase.
const CLOUD_SPEED: f64 = 50.0;
/// Horizontal spacing between consecutive clouds.
const CLOUD_SPACING: f64 = 100.0;
/// Vertical spacing between consecutive clouds.
const CLOUD_ROW_HEIGHT: f64 = 60.0;
/// Vertical offset of the first cloud.
const CLOUD_TOP: f64 = 100.0;

/// Monotonic render-loop phase counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SkyPhase {
    phase: f64,
}

impl SkyPhase {
    #[must_use]
    pub const fn value(self) -> f64 {
        self.phase
    }

    /// Advance by `delta`. Non-positive and non-finite deltas are ignored.
    /// Returns `true` if the phase moved.
    pub fn advance(&mut self, delta: f64) -> bool {
        if !delta.is_finite() || delta <= 0.0 {
            return false;
        }
        let next = self.phase + delta;
        if !next.is_finite() {
            return false;
        }
        self.phase = next;
        true
    }

    /// Cloud centers for a container of `width`. A non-positive width pins
    /// every cloud to `x = 0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cloud_positions(self, width: f64) -> Vec<Point> {
        (0..CLOUD_COUNT)
            .map(|i| {
                let i = i as f64;
                let travel = self.phase.mul_add(CLOUD_SPEED, i * CLOUD_SPACING);
                let x = if width > 0.0 { travel.rem_euclid(width) } else { 0.0 };
                Point {
                    x,
                    y: i.mul_add(CLOUD_ROW_HEIGHT, CLOUD_TOP),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert!(SkyPhase::default().value().abs() < f64::EPSILON);
    }

    #[test]
    fn advance_is_monotonic() {
        let mut sky = SkyPhase::default();
        assert!(sky.advance(0.5));
        assert!(!sky.advance(-1.0));
        assert!(!sky.advance(0.0));
        assert!(!sky.advance(f64::NAN));
        assert!(!sky.advance(f64::INFINITY));
        assert!((sky.value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn clouds_at_phase_zero() {
        let clouds = SkyPhase::default().cloud_positions(390.0);
        assert_eq!(clouds.len(), CLOUD_COUNT);
        let xs: Vec<f64> = clouds.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 100.0, 200.0, 300.0, 10.0]);
        let ys: Vec<f64> = clouds.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![100.0, 160.0, 220.0, 280.0, 340.0]);
    }

    #[test]
    fn clouds_wrap_against_width() {
        let mut sky = SkyPhase::default();
        sky.advance(100.0);
        for cloud in sky.cloud_positions(390.0) {
            assert!((0.0..390.0).contains(&cloud.x));
        }
    }

    #[test]
    fn zero_width_pins_clouds() {
        let mut sky = SkyPhase::default();
        sky.advance(3.0);
        assert!(sky.cloud_positions(0.0).iter().all(|p| p.x == 0.0));
    }
}
