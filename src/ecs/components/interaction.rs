//! Components describing how world objects interact with characters.

pub use crate::physics::body::BodyKind;

use crate::interfaces::HandTarget;

/// Marks an entity as something a character's hands may reach for.
///
/// Toggle `active` to opt out of IK targeting without despawning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandTargetComponent {
    pub active: bool,
}

impl HandTargetComponent {
    pub fn active() -> Self {
        Self { active: true }
    }

    pub fn inactive() -> Self {
        Self { active: false }
    }
}

impl Default for HandTargetComponent {
    fn default() -> Self {
        Self::active()
    }
}

impl HandTarget for HandTargetComponent {
    fn is_active(&self) -> bool {
        self.active
    }
}
