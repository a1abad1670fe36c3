//! Physics-facing types: collider surface friction, a minimal character body
//! integrator, and the per-step contact manifolds consumed by the ECS glue.

pub mod body;
#[cfg(feature = "ecs")]
pub mod contact;
pub mod material;

pub use body::{BodyKind, SimulatedBody};
pub use material::{FrictionCombine, SurfaceFriction};
