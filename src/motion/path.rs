//! Navigation results.

use glam::Vec3;

use crate::error::NavigationError;

/// An immutable corner sequence returned by a navigation query.
///
/// Replaced wholesale whenever the path is recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPlan {
    corners: Vec<Vec3>,
    length: f32,
}

impl PathPlan {
    pub fn new(corners: Vec<Vec3>) -> Result<Self, NavigationError> {
        if corners.is_empty() {
            return Err(NavigationError::EmptyPath);
        }
        let length = corners.windows(2).map(|w| w[0].distance(w[1])).sum();
        Ok(Self { corners, length })
    }

    pub fn corners(&self) -> &[Vec3] {
        &self.corners
    }

    /// Cumulative corner-to-corner length.
    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn first(&self) -> Vec3 {
        self.corners[0]
    }

    pub fn last(&self) -> Vec3 {
        self.corners[self.corners.len() - 1]
    }

    /// Corner to steer toward: the one after the start, or the goal for single-corner paths.
    pub fn next_corner(&self) -> Vec3 {
        self.corners.get(1).copied().unwrap_or_else(|| self.last())
    }
}
