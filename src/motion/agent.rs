//! Motion delegated to a steering agent.

use glam::Vec3;

use super::{MotionEvent, MotionProgress, SpeedCurve};
use crate::config::AgentConfig;
use crate::error::ConfigError;

/// Steering backend that owns the body's low-level velocity.
pub trait SteeringAgent {
    fn position(&self) -> Vec3;
    fn set_destination(&mut self, destination: Vec3);
    fn set_speed(&mut self, speed: f32);
    /// Radius within which the agent counts as arrived.
    fn stopping_distance(&self) -> f32;
    fn set_stopped(&mut self, stopped: bool);
    fn is_stopped(&self) -> bool;
}

/// Monitors a steering agent toward a destination and shapes its speed.
///
/// Each tick the remaining straight-line distance is recomputed and the agent
/// speed is set from a distance-to-speed curve. The command ends once the agent
/// is within its stopping distance.
#[derive(Debug, Clone)]
pub struct AgentMotionController {
    config: AgentConfig,
    curve: SpeedCurve,
    destination: Vec3,
    total_distance: f32,
    distance_remaining: f32,
    in_progress: bool,
    events: Vec<MotionEvent>,
}

impl AgentMotionController {
    pub fn new(config: AgentConfig, agent: &dyn SteeringAgent) -> Result<Self, ConfigError> {
        config.validate()?;

        let curve = SpeedCurve::new(config.curve_floor, config.full_speed_distance);
        Ok(Self {
            config,
            curve,
            destination: agent.position(),
            total_distance: 0.0,
            distance_remaining: 0.0,
            in_progress: false,
            events: Vec::new(),
        })
    }

    pub fn destination(&self) -> Vec3 {
        self.destination
    }

    pub fn curve(&self) -> &SpeedCurve {
        &self.curve
    }

    pub fn drain_events(&mut self) -> Vec<MotionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Request movement to `target`. Returns whether the request was accepted.
    ///
    /// While a command is in flight the agent is simply redirected.
    pub fn move_to(&mut self, target: Vec3, agent: &mut dyn SteeringAgent) -> bool {
        if target.distance(self.destination) <= self.config.destination_tolerance {
            return false;
        }

        let distance = agent.position().distance(target);
        self.total_distance = distance;
        self.distance_remaining = distance;
        self.destination = target;
        agent.set_destination(target);

        if !self.in_progress {
            agent.set_stopped(false);
            self.in_progress = true;
        }

        tracing::debug!(destination = ?target, distance, "agent move started");
        self.events.push(MotionEvent::Started {
            destination: target,
        });
        true
    }

    /// Stop the agent, end the command and zero the distance readouts.
    pub fn stop(&mut self, agent: &mut dyn SteeringAgent) {
        agent.set_stopped(true);
        self.total_distance = 0.0;
        self.distance_remaining = 0.0;
        if self.in_progress {
            self.in_progress = false;
            self.events.push(MotionEvent::Cancelled);
        }
    }

    /// Advance the monitoring loop by one tick.
    pub fn tick(&mut self, agent: &mut dyn SteeringAgent) {
        if !self.in_progress {
            return;
        }

        self.distance_remaining = agent.position().distance(self.destination);
        if self.distance_remaining <= agent.stopping_distance() {
            agent.set_stopped(true);
            self.in_progress = false;
            tracing::debug!(remaining = self.distance_remaining, "agent arrived");
            self.events.push(MotionEvent::Arrived {
                position: agent.position(),
            });
            self.events.push(MotionEvent::Completed);
            return;
        }

        agent.set_speed(self.config.max_speed * self.curve.evaluate(self.distance_remaining));
    }
}

impl MotionProgress for AgentMotionController {
    fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    fn total_distance(&self) -> f32 {
        self.total_distance
    }

    fn distance_remaining(&self) -> f32 {
        self.distance_remaining
    }
}
