//! Animation-side outputs: the locomotion speed parameter and recorded IK goals.

use glam::Vec3;

use crate::frame::horizontal;
use crate::interfaces::{AnimationBackend, Limb};
use crate::motion::MotionProgress;

/// IK goal last pushed for one hand.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LimbPose {
    pub position: Vec3,
    pub weight: f32,
}

/// Animation backend that keeps the most recent values.
///
/// Hosts can read it after each tick and forward it to their animator; it is
/// also what UI and debug views inspect.
#[derive(Debug, Clone, Default)]
pub struct PoseTargets {
    pub speed: f32,
    pub right: LimbPose,
    pub left: LimbPose,
}

impl PoseTargets {
    pub fn limb(&self, limb: Limb) -> LimbPose {
        match limb {
            Limb::Right => self.right,
            Limb::Left => self.left,
        }
    }
}

impl AnimationBackend for PoseTargets {
    fn set_speed_parameter(&mut self, value: f32) {
        self.speed = value;
    }

    fn set_limb_ik(&mut self, limb: Limb, position: Vec3, weight: f32) {
        let pose = LimbPose { position, weight };
        match limb {
            Limb::Right => self.right = pose,
            Limb::Left => self.left = pose,
        }
    }
}

/// Pushes the locomotion speed parameter once per frame.
///
/// The reported speed fades out over the last `fade_radius` units of the path
/// so the walk cycle settles with the body, regardless of residual velocity.
#[derive(Debug, Clone, Copy)]
pub struct LocomotionAnimationBridge {
    pub fade_radius: f32,
}

impl LocomotionAnimationBridge {
    pub fn new(fade_radius: f32) -> Self {
        Self { fade_radius }
    }

    /// Speed value for the given body velocity and remaining path length.
    pub fn speed_sample(&self, velocity: Vec3, distance_remaining: f32) -> f32 {
        let fade = if self.fade_radius > 0.0 {
            (distance_remaining / self.fade_radius).clamp(0.0, 1.0)
        } else {
            0.0
        };
        horizontal(velocity).length() * fade
    }

    pub fn push(
        &self,
        velocity: Vec3,
        progress: &dyn MotionProgress,
        backend: &mut dyn AnimationBackend,
    ) {
        let speed = self.speed_sample(velocity, progress.distance_remaining());
        backend.set_speed_parameter(speed);
    }
}

impl Default for LocomotionAnimationBridge {
    fn default() -> Self {
        Self::new(0.25)
    }
}
