//! Contact data reported by the host physics step.

use glam::Vec3;

/// A single contact point between two colliders.
#[derive(Debug, Clone, Copy)]
pub struct ContactPoint {
    /// Contact position in world space.
    pub position: Vec3,
    /// Penetration depth.
    pub penetration: f32,
}

/// A collection of contact points between two entities.
#[derive(Debug, Clone)]
pub struct ContactManifold {
    pub entity_a: hecs::Entity,
    pub entity_b: hecs::Entity,
    /// Contact normal (from A to B).
    pub normal: Vec3,
    pub contacts: Vec<ContactPoint>,
}

impl ContactManifold {
    /// Whether `entity` is one of the two participants.
    pub fn involves(&self, entity: hecs::Entity) -> bool {
        self.entity_a == entity || self.entity_b == entity
    }

    /// The participant that is not `entity`, if `entity` participates.
    pub fn other(&self, entity: hecs::Entity) -> Option<hecs::Entity> {
        if self.entity_a == entity {
            Some(self.entity_b)
        } else if self.entity_b == entity {
            Some(self.entity_a)
        } else {
            None
        }
    }

    /// Normal pointing from the other participant toward `entity`.
    pub fn normal_toward(&self, entity: hecs::Entity) -> Vec3 {
        if self.entity_a == entity {
            -self.normal
        } else {
            self.normal
        }
    }

    /// Deepest contact point, used as the representative touch position.
    pub fn deepest(&self) -> Option<&ContactPoint> {
        self.contacts
            .iter()
            .max_by(|a, b| a.penetration.total_cmp(&b.penetration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifold_orientation() {
        let mut world = hecs::World::new();
        let a = world.spawn(());
        let b = world.spawn(());
        let stranger = world.spawn(());

        let manifold = ContactManifold {
            entity_a: a,
            entity_b: b,
            normal: Vec3::X,
            contacts: vec![
                ContactPoint {
                    position: Vec3::ZERO,
                    penetration: 0.01,
                },
                ContactPoint {
                    position: Vec3::ONE,
                    penetration: 0.05,
                },
            ],
        };

        assert!(manifold.involves(a));
        assert!(!manifold.involves(stranger));
        assert_eq!(manifold.other(a), Some(b));
        assert_eq!(manifold.other(b), Some(a));
        assert_eq!(manifold.other(stranger), None);
        assert_eq!(manifold.normal_toward(a), Vec3::NEG_X);
        assert_eq!(manifold.normal_toward(b), Vec3::X);
        assert_eq!(manifold.deepest().map(|c| c.position), Some(Vec3::ONE));
    }
}
