//! Contact-driven hand IK targeting.
//!
//! [`HandPlacementCoordinator`] decides which tracked contact each hand holds;
//! each [`LimbIkChannel`] then blends its hand position and weight toward the
//! contact (or back to rest) and pushes the result to the animation backend.

pub mod coordinator;
pub mod limb;

pub use coordinator::{HandAssignments, HandPlacementCoordinator};
pub use limb::LimbIkChannel;
