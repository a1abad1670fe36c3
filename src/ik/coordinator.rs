//! Assignment of live contacts to the two hands.

use crate::config::HandIkConfig;
use crate::contact::{ContactId, ContactTracker};
use crate::frame::Frame;
use crate::interfaces::{AnimationBackend, Limb};

use super::limb::LimbIkChannel;

/// Snapshot of which contact each hand is holding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandAssignments {
    pub right: Option<ContactId>,
    pub left: Option<ContactId>,
    /// Live contacts currently held by neither hand.
    pub unassigned: Vec<ContactId>,
}

/// Assigns tracked contacts to the right and left hand each animation tick.
///
/// Contacts more than `rejection_depth` behind the character are released.
/// The rest go to the hand on their side: lateral coordinate >= 0 is the right
/// hand, < 0 the left. A contact holds at most one hand. When two contacts
/// land on the same side in one pass, the later one in tracker order wins.
#[derive(Debug, Clone)]
pub struct HandPlacementCoordinator {
    rejection_depth: f32,
    right: LimbIkChannel,
    left: LimbIkChannel,
}

impl HandPlacementCoordinator {
    pub fn new(config: HandIkConfig) -> Self {
        Self {
            rejection_depth: config.rejection_depth,
            right: LimbIkChannel::new(Limb::Right, config.right),
            left: LimbIkChannel::new(Limb::Left, config.left),
        }
    }

    pub fn channel(&self, limb: Limb) -> &LimbIkChannel {
        match limb {
            Limb::Right => &self.right,
            Limb::Left => &self.left,
        }
    }

    fn channel_mut(&mut self, limb: Limb) -> &mut LimbIkChannel {
        match limb {
            Limb::Right => &mut self.right,
            Limb::Left => &mut self.left,
        }
    }

    /// Number of hands currently holding a contact.
    pub fn assigned_count(&self) -> usize {
        [&self.right, &self.left]
            .into_iter()
            .filter(|channel| channel.target().is_some())
            .count()
    }

    /// Current assignment of every live contact.
    pub fn assignments(&self, tracker: &ContactTracker) -> HandAssignments {
        let right = self.right.target();
        let left = self.left.target();
        let unassigned = tracker
            .iter()
            .map(|c| c.id)
            .filter(|id| Some(*id) != right && Some(*id) != left)
            .collect();
        HandAssignments {
            right,
            left,
            unassigned,
        }
    }

    /// Resolve assignments against the post-physics contact set, then relax both hands.
    pub fn evaluate(
        &mut self,
        tracker: &ContactTracker,
        frame: &Frame,
        dt: f32,
        backend: &mut dyn AnimationBackend,
    ) {
        self.resolve(tracker, frame);

        self.right.relax(tracker, frame, dt, backend);
        self.left.relax(tracker, frame, dt, backend);
    }

    fn resolve(&mut self, tracker: &ContactTracker, frame: &Frame) {
        for limb in Limb::ALL {
            let channel = self.channel_mut(limb);
            if let Some(id) = channel.target() {
                if !tracker.contains(id) {
                    tracing::trace!(?limb, ?id, "dropping stale hand target");
                    channel.set_target(None);
                }
            }
        }

        for contact in tracker.iter() {
            let local = frame.to_local(contact.point);

            if local.z < self.rejection_depth {
                for limb in Limb::ALL {
                    let channel = self.channel_mut(limb);
                    if channel.is_assigned_to(contact.id) {
                        channel.set_target(None);
                    }
                }
                continue;
            }

            let side = if local.x >= 0.0 { Limb::Right } else { Limb::Left };
            if self.channel(side).is_assigned_to(contact.id) {
                continue;
            }
            self.channel_mut(side).set_target(Some(contact.id));

            let other = self.channel_mut(side.other());
            if other.is_assigned_to(contact.id) {
                other.set_target(None);
            }
        }
    }
}

impl Default for HandPlacementCoordinator {
    fn default() -> Self {
        Self::new(HandIkConfig::default())
    }
}
