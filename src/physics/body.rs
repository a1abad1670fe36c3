//! Minimal character rigid body integration.
//!
//! Hosts normally bring their own integrator; `SimulatedBody` exists so the
//! controllers can be driven headless (demo app, tests, benchmarks).

use glam::{Quat, Vec3};

use super::material::SurfaceFriction;
use crate::interfaces::CharacterBody;

/// Rigid body type of an object the character may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Affected by forces and collisions.
    Dynamic,
    /// Immovable.
    Static,
    /// Position controlled by user, but affects dynamic bodies.
    Kinematic,
}

/// Capsule character body over a flat ground plane.
#[derive(Debug, Clone)]
pub struct SimulatedBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub linear_velocity: Vec3,
    /// Friction of the character collider.
    pub friction: SurfaceFriction,
    /// Gravity vector. Default: (0, -9.81, 0).
    pub gravity: Vec3,
    /// Linear damping factor (default: 0.0).
    pub linear_damping: f32,
    /// Distance from the body origin down to the feet.
    pub half_height: f32,
    /// Height of the ground plane.
    pub ground_height: f32,
    /// Friction coefficient of the ground surface.
    pub ground_friction: f32,
    grounded: bool,
}

impl SimulatedBody {
    /// Create a body standing on the ground plane `y = 0` with its feet at `feet`.
    pub fn standing_at(feet: Vec3, half_height: f32) -> Self {
        Self {
            position: feet + Vec3::Y * half_height,
            rotation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            friction: SurfaceFriction::default(),
            gravity: Vec3::new(0.0, -9.81, 0.0),
            linear_damping: 0.0,
            half_height,
            ground_height: feet.y,
            ground_friction: 0.6,
            grounded: true,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Feet position (bottom of the capsule).
    pub fn feet(&self) -> Vec3 {
        self.position - Vec3::Y * self.half_height
    }

    /// Advance the body by `dt` seconds using semi-implicit Euler.
    pub fn step(&mut self, dt: f32) {
        // Gravity and damping
        self.linear_velocity += self.gravity * dt;
        self.linear_velocity *= (1.0 - self.linear_damping).max(0.0);

        // Coulomb friction against the ground only acts while supported.
        if self.grounded {
            let mu = self.friction.dynamic_against(self.ground_friction);
            let max_decel = mu * self.gravity.length() * dt;
            let planar = Vec3::new(self.linear_velocity.x, 0.0, self.linear_velocity.z);
            let speed = planar.length();
            if speed > 0.0 {
                let reduced = (speed - max_decel).max(0.0);
                let planar = planar * (reduced / speed);
                self.linear_velocity.x = planar.x;
                self.linear_velocity.z = planar.z;
            }
        }

        self.position += self.linear_velocity * dt;

        let floor = self.ground_height + self.half_height;
        if self.position.y <= floor {
            self.position.y = floor;
            if self.linear_velocity.y < 0.0 {
                self.linear_velocity.y = 0.0;
            }
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }
}

impl CharacterBody for SimulatedBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn velocity(&self) -> Vec3 {
        self.linear_velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.linear_velocity = velocity;
    }

    fn friction(&self) -> SurfaceFriction {
        self.friction
    }

    fn set_friction(&mut self, friction: SurfaceFriction) {
        self.friction = friction;
    }
}
