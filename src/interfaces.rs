//! Contracts for the external collaborators the locomotion core drives.
//!
//! The host owns the navigation mesh, the rigid-body integrator, the
//! orientation controller and the animation backend. The core only talks to
//! them through these traits, once per tick.

use glam::{Quat, Vec3};

use crate::error::NavigationError;
use crate::frame::Frame;
use crate::physics::material::SurfaceFriction;

/// One of the two hands driven by IK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limb {
    Right,
    Left,
}

impl Limb {
    pub const ALL: [Limb; 2] = [Limb::Right, Limb::Left];

    /// The opposite hand.
    pub fn other(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
        }
    }
}

/// Path query provider.
pub trait NavigationQuery {
    /// Ordered corners from `from` to `to` (or the nearest reachable point).
    ///
    /// The first corner is the start position.
    fn find_path(&self, from: Vec3, to: Vec3) -> Result<Vec<Vec3>, NavigationError>;
}

/// The character's rigid body as seen by the motion controller.
pub trait CharacterBody {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn rotation(&self) -> Quat;
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    fn friction(&self) -> SurfaceFriction;
    fn set_friction(&mut self, friction: SurfaceFriction);

    /// Body frame built from the current position and rotation.
    fn frame(&self) -> Frame {
        Frame::new(self.position(), self.rotation())
    }
}

/// Opt-in marker for objects the hands may reach for.
pub trait HandTarget {
    /// Inactive targets stay in the world but are ignored for IK.
    fn is_active(&self) -> bool;
}

impl HandTarget for bool {
    fn is_active(&self) -> bool {
        *self
    }
}

/// Turns the character to face a horizontal direction.
pub trait OrientationController {
    /// Advance the turn toward `direction` and return the remaining turn
    /// magnitude in radians (0 once aligned).
    fn turn_toward(&mut self, direction: Vec3, dt: f32) -> f32;
}

/// Animation / IK evaluation backend.
pub trait AnimationBackend {
    fn set_speed_parameter(&mut self, value: f32);
    fn set_limb_ik(&mut self, limb: Limb, position: Vec3, weight: f32);
}
