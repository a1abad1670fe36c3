//! Live set of hand-target contacts on the character.

use glam::Vec3;

use crate::interfaces::HandTarget;

/// Identity of a collidable object in the host world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

#[cfg(feature = "ecs")]
impl From<hecs::Entity> for ObjectId {
    fn from(entity: hecs::Entity) -> Self {
        Self(entity.to_bits().get())
    }
}

/// Stable handle to a tracked contact.
///
/// A handle stays valid for as long as the contact persists and is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(u64);

/// One touch between the character and a hand-target object.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactEvent {
    pub id: ContactId,
    pub object: ObjectId,
    /// Contact point in world space.
    pub point: Vec3,
    /// Contact normal, pointing away from the touched surface.
    pub normal: Vec3,
}

/// Tracks contacts with active hand-target objects from collision callbacks.
///
/// Entries are kept in discovery order.
#[derive(Debug, Default)]
pub struct ContactTracker {
    contacts: Vec<ContactEvent>,
    next_id: u64,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// First contact with `object`.
    ///
    /// Objects without the hand-target capability, or inactive ones, are ignored.
    pub fn on_contact_begin(
        &mut self,
        object: ObjectId,
        target: Option<&dyn HandTarget>,
        point: Vec3,
        normal: Vec3,
    ) {
        let Some(target) = target else {
            return;
        };
        if !target.is_active() {
            return;
        }

        if let Some(existing) = self.contacts.iter_mut().find(|c| c.object == object) {
            existing.point = point;
            existing.normal = normal;
            return;
        }
        self.push(object, point, normal);
    }

    /// Contact with `object` continues this physics step.
    pub fn on_contact_persist(
        &mut self,
        object: ObjectId,
        target: Option<&dyn HandTarget>,
        point: Vec3,
        normal: Vec3,
    ) {
        let Some(target) = target else {
            return;
        };

        match self.contacts.iter().position(|c| c.object == object) {
            Some(index) if target.is_active() => {
                let contact = &mut self.contacts[index];
                contact.point = point;
                contact.normal = normal;
            }
            Some(index) => {
                let removed = self.contacts.remove(index);
                tracing::trace!(object = removed.object.0, "hand target went inactive");
            }
            // Activity can toggle on between enter and stay.
            None if target.is_active() => self.push(object, point, normal),
            None => {}
        }
    }

    /// Contact with `object` ended.
    pub fn on_contact_end(&mut self, object: ObjectId) {
        self.contacts.retain(|c| c.object != object);
    }

    pub fn get(&self, id: ContactId) -> Option<&ContactEvent> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.get(id).is_some()
    }

    pub fn find_object(&self, object: ObjectId) -> Option<&ContactEvent> {
        self.contacts.iter().find(|c| c.object == object)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContactEvent> {
        self.contacts.iter()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    fn push(&mut self, object: ObjectId, point: Vec3, normal: Vec3) {
        let id = ContactId(self.next_id);
        self.next_id += 1;
        tracing::trace!(object = object.0, id = id.0, "hand contact began");
        self.contacts.push(ContactEvent {
            id,
            object,
            point,
            normal,
        });
    }
}
