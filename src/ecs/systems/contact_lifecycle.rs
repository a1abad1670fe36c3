//! Turns per-step contact manifolds into begin/persist/end callbacks.
//!
//! The physics step reports every touching pair each step. The tracker wants
//! lifecycle events, so this system remembers which entities touched the
//! character last step and diffs against the new manifolds.

use crate::character::BodyCollision;
use crate::contact::{ContactTracker, ObjectId};
use crate::ecs::components::interaction::{BodyKind, HandTargetComponent};
use crate::interfaces::HandTarget;
use crate::physics::contact::ContactManifold;

/// Per-character contact diffing state.
#[derive(Debug, Default)]
pub struct ContactLifecycle {
    /// Entities touching the character after the previous dispatch, in discovery order.
    touching: Vec<hecs::Entity>,
}

impl ContactLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touching(&self) -> &[hecs::Entity] {
        &self.touching
    }

    /// Dispatch this step's manifolds for `character` into `tracker`.
    ///
    /// Returns the collisions that began this step, for the motion controller's
    /// collision reaction. Entities without a [`BodyKind`] count as static.
    pub fn dispatch(
        &mut self,
        character: hecs::Entity,
        manifolds: &[ContactManifold],
        world: &hecs::World,
        tracker: &mut ContactTracker,
    ) -> Vec<BodyCollision> {
        let mut current = Vec::new();
        let mut began = Vec::new();

        for manifold in manifolds {
            let Some(other) = manifold.other(character) else {
                continue;
            };
            if current.contains(&other) {
                continue;
            }
            let Some(contact) = manifold.deepest() else {
                continue;
            };
            current.push(other);

            let point = contact.position;
            let normal = manifold.normal_toward(character);
            let object = ObjectId::from(other);
            let component = world.get::<&HandTargetComponent>(other).ok();
            let target = component.as_deref().map(|t| t as &dyn HandTarget);

            if self.touching.contains(&other) {
                tracker.on_contact_persist(object, target, point, normal);
            } else {
                tracker.on_contact_begin(object, target, point, normal);
                let kind = world
                    .get::<&BodyKind>(other)
                    .map(|kind| *kind)
                    .unwrap_or(BodyKind::Static);
                began.push(BodyCollision { point, kind });
            }
        }

        for previous in &self.touching {
            if !current.contains(previous) {
                tracker.on_contact_end(ObjectId::from(*previous));
            }
        }

        self.touching = current;
        began
    }
}
