//! Path-following motion controllers.
//!
//! Two interchangeable strategies share the same external contract
//! ([`MotionProgress`] plus `move_to` / `stop`):
//!
//! - [`DirectMotionController`] owns the body's horizontal velocity every tick.
//! - [`AgentMotionController`] hands destination and speed to a steering agent.
//!
//! Both are explicit state machines resumed once per tick by the host. There is
//! at most one command in flight; a new command replaces the old one.

pub mod agent;
pub mod curve;
pub mod direct;
pub mod path;

use glam::Vec3;

use crate::error::NavigationError;

pub use agent::{AgentMotionController, SteeringAgent};
pub use curve::SpeedCurve;
pub use direct::{DirectMotionController, MotionContext, MoveOutcome};
pub use path::PathPlan;

/// Distance bookkeeping for an in-flight motion command.
pub trait MotionProgress {
    fn is_in_progress(&self) -> bool;
    fn total_distance(&self) -> f32;
    fn distance_remaining(&self) -> f32;

    fn distance_traveled(&self) -> f32 {
        self.total_distance() - self.distance_remaining()
    }

    /// Fraction of the command completed; 0 when nothing was requested.
    fn distance_rate(&self) -> f32 {
        let total = self.total_distance();
        if total > 0.0 {
            self.distance_traveled() / total
        } else {
            0.0
        }
    }
}

/// Notifications emitted by the motion controllers, drained by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionEvent {
    /// A command started or was redirected; carries the resolved destination.
    Started { destination: Vec3 },
    /// The body reached the destination and is settling its turn.
    Arrived { position: Vec3 },
    /// The command finished, including the residual turn.
    Completed,
    /// A command was cancelled before completing.
    Cancelled,
    /// The path query failed; the command was aborted.
    NavigationFailed(NavigationError),
}
