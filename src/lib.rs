//! Rein Locomotion
//!
//! Path-following locomotion and contact-driven hand IK targeting for
//! physically simulated characters.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **interfaces** - Contracts for the host's navigation, physics, orientation and animation
//! 2. **frame** - Body-relative frames of reference and rate-limited blending helpers
//! 3. **contact** - Live set of hand-target contacts
//! 4. **ik** - Hand placement coordinator and per-limb IK blend channels
//! 5. **motion** - Direct and agent-delegated motion controllers
//! 6. **animation** - Speed parameter bridge and recorded IK goals
//! 7. **character** - Per-character aggregate and frame ordering
//! 8. **physics** - Surface friction, a minimal body integrator, contact manifolds
//! 9. **ecs** - hecs integration (feature = "ecs")
//!
//! Everything is single-threaded and frame-stepped: the host calls into each
//! character once per tick, movement before the physics step and hand IK after it.

pub mod animation;
pub mod character;
pub mod config;
pub mod contact;
pub mod error;
pub mod frame;
pub mod ik;
pub mod interfaces;
pub mod motion;
pub mod navigation;
pub mod orientation;
pub mod physics;

#[cfg(feature = "ecs")]
pub mod ecs;

// Re-export commonly used types
pub use animation::{LimbPose, LocomotionAnimationBridge, PoseTargets};
pub use character::{BodyCollision, Character};
pub use config::{AgentConfig, HandIkConfig, LimbConfig, LimbSpeed, LocomotionConfig};
pub use contact::{ContactEvent, ContactId, ContactTracker, ObjectId};
pub use error::{ConfigError, NavigationError};
pub use frame::Frame;
pub use ik::{HandAssignments, HandPlacementCoordinator, LimbIkChannel};
pub use interfaces::{
    AnimationBackend, CharacterBody, HandTarget, Limb, NavigationQuery, OrientationController,
};
pub use motion::{
    AgentMotionController, DirectMotionController, MotionContext, MotionEvent, MotionProgress,
    MoveOutcome, PathPlan, SpeedCurve, SteeringAgent,
};
pub use navigation::{Aabb, StraightLineNavigator};
pub use orientation::YawTurner;
pub use physics::{BodyKind, FrictionCombine, SimulatedBody, SurfaceFriction};

#[cfg(feature = "ecs")]
pub use ecs::prelude::*;

// Re-export glam for convenience
pub use glam;
