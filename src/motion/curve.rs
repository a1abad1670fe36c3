//! Distance-to-speed response curve for agent steering.

/// Monotonic smoothstep easing from `floor` at distance 0 to 1 at `full_speed_distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedCurve {
    pub floor: f32,
    pub full_speed_distance: f32,
}

impl SpeedCurve {
    pub fn new(floor: f32, full_speed_distance: f32) -> Self {
        Self {
            floor,
            full_speed_distance,
        }
    }

    /// Curve output in `[floor, 1]` for the given remaining distance.
    pub fn evaluate(&self, distance: f32) -> f32 {
        if self.full_speed_distance <= 0.0 {
            return 1.0;
        }
        let t = (distance / self.full_speed_distance).clamp(0.0, 1.0);
        let eased = t * t * (3.0 - 2.0 * t);
        self.floor + (1.0 - self.floor) * eased
    }
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self::new(0.1, 2.0)
    }
}
