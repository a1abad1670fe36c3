//! Surface friction settings for the character collider.

/// How the friction of two touching surfaces is combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrictionCombine {
    #[default]
    Average,
    Minimum,
    Multiply,
    Maximum,
}

impl FrictionCombine {
    /// Combine the coefficients of two surfaces.
    pub fn combine(self, a: f32, b: f32) -> f32 {
        match self {
            Self::Average => (a + b) * 0.5,
            Self::Minimum => a.min(b),
            Self::Multiply => a * b,
            Self::Maximum => a.max(b),
        }
    }
}

/// Friction coefficients and combine mode of a collider surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceFriction {
    pub dynamic: f32,
    pub static_: f32,
    pub combine: FrictionCombine,
}

impl SurfaceFriction {
    /// Frictionless sliding while the controller drives velocity.
    pub const SLIDING: Self = Self::uniform(0.0, FrictionCombine::Minimum);
    /// Full grip once the character has arrived.
    pub const GRIPPING: Self = Self::uniform(1.0, FrictionCombine::Maximum);

    /// Same static and dynamic coefficient.
    pub const fn uniform(value: f32, combine: FrictionCombine) -> Self {
        Self {
            dynamic: value,
            static_: value,
            combine,
        }
    }

    /// Effective dynamic coefficient against `other`, using this surface's combine mode.
    pub fn dynamic_against(&self, other: f32) -> f32 {
        self.combine.combine(self.dynamic, other)
    }

    /// Effective static coefficient against `other`, using this surface's combine mode.
    pub fn static_against(&self, other: f32) -> f32 {
        self.combine.combine(self.static_, other)
    }
}

impl Default for SurfaceFriction {
    fn default() -> Self {
        Self::uniform(0.6, FrictionCombine::Average)
    }
}
