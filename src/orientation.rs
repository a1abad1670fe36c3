//! Rate-limited yaw orientation controller.

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec3};

use crate::frame::yaw_of;
use crate::interfaces::OrientationController;

/// Remaining turn below this counts as aligned.
pub const ALIGNED_EPSILON: f32 = 1e-4;

/// Turns a yaw angle toward the requested direction at a fixed angular rate.
///
/// The host copies [`YawTurner::rotation`] onto the body after each tick.
#[derive(Debug, Clone)]
pub struct YawTurner {
    /// Current yaw in radians about +Y (0 faces +Z).
    pub yaw: f32,
    /// Turn rate in radians per second. Default: 2π.
    pub turn_rate: f32,
}

impl YawTurner {
    pub fn new(yaw: f32, turn_rate: f32) -> Self {
        Self { yaw, turn_rate }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }
}

impl Default for YawTurner {
    fn default() -> Self {
        Self::new(0.0, TAU)
    }
}

/// Wrap an angle to `(-π, π]`.
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

impl OrientationController for YawTurner {
    fn turn_toward(&mut self, direction: Vec3, dt: f32) -> f32 {
        let Some(target) = yaw_of(direction) else {
            return 0.0;
        };

        let delta = wrap_angle(target - self.yaw);
        let step = self.turn_rate * dt;
        if delta.abs() <= step {
            self.yaw = target;
            return 0.0;
        }
        self.yaw = wrap_angle(self.yaw + delta.signum() * step);
        let remaining = delta.abs() - step;
        if remaining <= ALIGNED_EPSILON {
            0.0
        } else {
            remaining
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(3.0 * PI / 2.0) + FRAC_PI_2).abs() < 1e-5);
        assert!((wrap_angle(-3.0 * PI / 2.0) - FRAC_PI_2).abs() < 1e-5);
        assert!((wrap_angle(0.25) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_turns_at_rate_then_reports_aligned() {
        let mut turner = YawTurner::new(0.0, PI);
        let remaining = turner.turn_toward(Vec3::X, 0.25);
        assert!((remaining - FRAC_PI_2 / 2.0).abs() < 1e-5);
        assert!((turner.yaw - PI / 4.0).abs() < 1e-5);

        assert_eq!(turner.turn_toward(Vec3::X, 0.25), 0.0);
        assert!((turner.forward() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_takes_short_way_round() {
        let mut turner = YawTurner::new(0.9 * PI, 1.0);
        turner.turn_toward(Vec3::new(-0.1, 0.0, -1.0), 0.01);
        // Target is just past -π; crossing the seam is shorter than unwinding.
        assert!(turner.yaw > 0.9 * PI);
    }

    #[test]
    fn test_zero_direction_is_aligned() {
        let mut turner = YawTurner::default();
        assert_eq!(turner.turn_toward(Vec3::ZERO, 0.1), 0.0);
        assert_eq!(turner.turn_toward(Vec3::Y, 0.1), 0.0);
        assert_eq!(turner.yaw, 0.0);
    }
}
