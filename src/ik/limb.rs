//! Per-hand IK blend state.

use glam::Vec3;

use crate::config::LimbConfig;
use crate::contact::{ContactId, ContactTracker};
use crate::frame::{move_towards, move_towards_f32, Frame};
use crate::interfaces::{AnimationBackend, Limb};

/// Blend state of one hand.
///
/// With a contact assigned, the hand eases onto the contact and the weight
/// rises to 1. Without one, the hand eases back to its rest offset and the
/// weight falls to 0. Both are rate limited so the hand never pops.
#[derive(Debug, Clone)]
pub struct LimbIkChannel {
    limb: Limb,
    config: LimbConfig,
    target: Option<ContactId>,
    /// Blended hand position in the body frame.
    local_point: Vec3,
    /// Last world-space position pushed to the backend. Before the first
    /// relax this is the rest offset placed at the world origin.
    position: Vec3,
    weight: f32,
}

impl LimbIkChannel {
    pub fn new(limb: Limb, config: LimbConfig) -> Self {
        let local_point = config.rest_offset;
        Self {
            limb,
            config,
            target: None,
            local_point,
            position: Frame::IDENTITY.to_world(local_point),
            weight: 0.0,
        }
    }

    pub fn limb(&self) -> Limb {
        self.limb
    }

    pub fn config(&self) -> &LimbConfig {
        &self.config
    }

    pub fn target(&self) -> Option<ContactId> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<ContactId>) {
        self.target = target;
    }

    pub fn is_assigned_to(&self, id: ContactId) -> bool {
        self.target == Some(id)
    }

    /// World-space hand position as of the last [`relax`](Self::relax).
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn local_point(&self) -> Vec3 {
        self.local_point
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// World-space point the hand is easing toward this step.
    pub fn goal(&self, tracker: &ContactTracker, frame: &Frame) -> Vec3 {
        frame.to_world(self.local_goal(tracker, frame))
    }

    /// Advance position and weight by one frame and push them to the backend.
    pub fn relax(
        &mut self,
        tracker: &ContactTracker,
        frame: &Frame,
        dt: f32,
        backend: &mut dyn AnimationBackend,
    ) {
        let contact = self.target.and_then(|id| tracker.get(id));

        let (rate, weight_target) = match contact {
            Some(_) => (self.config.speed.set, 1.0),
            None => (self.config.speed.reset, 0.0),
        };

        let local_goal = self.local_goal(tracker, frame);
        self.local_point = move_towards(self.local_point, local_goal, rate * dt);
        self.position = frame.to_world(self.local_point);

        let weight_rate = if weight_target < self.weight {
            self.config.speed.reset
        } else {
            self.config.speed.set
        };
        self.weight = move_towards_f32(self.weight, weight_target, weight_rate * dt);

        backend.set_limb_ik(self.limb, self.position, self.weight);
    }

    fn local_goal(&self, tracker: &ContactTracker, frame: &Frame) -> Vec3 {
        match self.target.and_then(|id| tracker.get(id)) {
            Some(contact) => {
                let mut point = contact.point;
                point.y = frame.origin.y + self.config.height_offset;
                point += contact.normal * self.config.normal_offset;
                frame.to_local(point)
            }
            None => self.config.rest_offset,
        }
    }
}
