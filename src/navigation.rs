//! Navigation query implementations for open ground.

use glam::Vec3;

use crate::error::NavigationError;
use crate::interfaces::NavigationQuery;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Whether the point lies inside the box on the ground plane (X/Z only).
    pub fn contains_planar(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.z >= self.min.z && point.z <= self.max.z
    }

    /// Nearest point inside the box on the ground plane, keeping the height.
    pub fn clamp_planar(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y,
            point.z.clamp(self.min.z, self.max.z),
        )
    }
}

/// Straight-line paths over unobstructed ground.
///
/// With walkable bounds set, goals outside the bounds are clipped to the
/// nearest walkable point and starts outside the bounds have no route.
#[derive(Debug, Clone, Default)]
pub struct StraightLineNavigator {
    pub bounds: Option<Aabb>,
}

impl StraightLineNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(bounds: Aabb) -> Self {
        Self {
            bounds: Some(bounds),
        }
    }
}

impl NavigationQuery for StraightLineNavigator {
    fn find_path(&self, from: Vec3, to: Vec3) -> Result<Vec<Vec3>, NavigationError> {
        if !from.is_finite() || !to.is_finite() {
            return Err(NavigationError::NoRoute { from, to });
        }
        let goal = match &self.bounds {
            Some(bounds) if !bounds.contains_planar(from) => {
                return Err(NavigationError::NoRoute { from, to });
            }
            Some(bounds) => bounds.clamp_planar(to),
            None => to,
        };
        Ok(vec![from, goal])
    }
}
