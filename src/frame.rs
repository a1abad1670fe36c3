//! Body-relative frames of reference.
//!
//! Axes follow the character convention: +X right, +Y up, +Z forward.

use glam::{Quat, Vec3};

/// A rigid frame of reference (origin + orientation), passed around by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub origin: Vec3,
    pub rotation: Quat,
}

impl Frame {
    /// Identity frame at the world origin.
    pub const IDENTITY: Self = Self {
        origin: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(origin: Vec3, rotation: Quat) -> Self {
        Self { origin, rotation }
    }

    /// Frame at `origin` rotated `yaw` radians about +Y.
    pub fn from_yaw(origin: Vec3, yaw: f32) -> Self {
        Self::new(origin, Quat::from_rotation_y(yaw))
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Express a world-space point in this frame.
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.origin)
    }

    /// Convert a point in this frame back to world space.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.origin + self.rotation * local
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Yaw angle (radians about +Y) whose forward axis points along `direction`.
///
/// Returns `None` for directions without a horizontal component.
pub fn yaw_of(direction: Vec3) -> Option<f32> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(flat.x.atan2(flat.z))
}

/// Drop the vertical component.
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        target
    } else {
        current + delta / distance * max_delta
    }
}

/// Scalar version of [`move_towards`].
pub fn move_towards_f32(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}
