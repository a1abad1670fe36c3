//! Tuning parameters for locomotion and hand placement.

use glam::Vec3;

use crate::error::ConfigError;
use crate::interfaces::Limb;

/// Direct-control motion configuration.
#[derive(Debug, Clone)]
pub struct LocomotionConfig {
    /// Cruise speed in units per second. Default: 3.
    pub speed: f32,
    /// Horizontal acceleration in units per second squared. Default: 4.
    pub acceleration: f32,
    /// `move_to` targets this close to the current destination are ignored. Default: 0.15.
    pub destination_tolerance: f32,
    /// Distance over which the cruise speed ramps down near the goal. Default: 0.5.
    pub slowdown_radius: f32,
    /// Lower bound of the slowdown factor. Default: 0.4.
    pub min_speed_factor: f32,
    /// Distance over which the animation speed parameter fades to zero. Default: 0.25.
    pub speed_fade_radius: f32,
    /// Distance from the body origin down to the feet. Default: 0.9.
    pub height_offset: f32,
    /// How far to back away after a kinematic body bumps the character. Default: 1.0.
    pub recoil_distance: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            acceleration: 4.0,
            destination_tolerance: 0.15,
            slowdown_radius: 0.5,
            min_speed_factor: 0.4,
            speed_fade_radius: 0.25,
            height_offset: 0.9,
            recoil_distance: 1.0,
        }
    }
}

impl LocomotionConfig {
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_acceleration(mut self, acceleration: f32) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_height_offset(mut self, height_offset: f32) -> Self {
        self.height_offset = height_offset;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("speed", self.speed)?;
        ConfigError::require_positive("acceleration", self.acceleration)?;
        ConfigError::require_non_negative("destination_tolerance", self.destination_tolerance)?;
        ConfigError::require_positive("slowdown_radius", self.slowdown_radius)?;
        ConfigError::require_range("min_speed_factor", self.min_speed_factor, 0.0, 1.0)?;
        ConfigError::require_positive("speed_fade_radius", self.speed_fade_radius)?;
        ConfigError::require_non_negative("height_offset", self.height_offset)?;
        ConfigError::require_non_negative("recoil_distance", self.recoil_distance)?;
        Ok(())
    }
}

/// Agent-delegated motion configuration.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Speed handed to the agent at full curve output. Default: 3.
    pub max_speed: f32,
    /// `move_to` targets this close to the current destination are ignored. Default: 0.15.
    pub destination_tolerance: f32,
    /// Curve output at distance 0. Default: 0.1.
    pub curve_floor: f32,
    /// Distance at which the curve reaches full speed. Default: 2.0.
    pub full_speed_distance: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_speed: 3.0,
            destination_tolerance: 0.15,
            curve_floor: 0.1,
            full_speed_distance: 2.0,
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("max_speed", self.max_speed)?;
        ConfigError::require_non_negative("destination_tolerance", self.destination_tolerance)?;
        ConfigError::require_range("curve_floor", self.curve_floor, 0.0, 1.0)?;
        ConfigError::require_positive("full_speed_distance", self.full_speed_distance)?;
        Ok(())
    }
}

/// Engage / release rates of one hand, in units (and weight) per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbSpeed {
    pub set: f32,
    pub reset: f32,
}

impl Default for LimbSpeed {
    fn default() -> Self {
        Self {
            set: 2.0,
            reset: 2.0,
        }
    }
}

/// Per-hand IK configuration.
#[derive(Debug, Clone)]
pub struct LimbConfig {
    /// Resting hand position in the body frame.
    pub rest_offset: Vec3,
    /// Height of the hand target above the body origin. Default: 0.25.
    pub height_offset: f32,
    /// Push-out distance along the contact normal. Default: 0.
    pub normal_offset: f32,
    pub speed: LimbSpeed,
}

impl LimbConfig {
    /// Default configuration for `limb`, with the rest pose mirrored across the body.
    pub fn for_limb(limb: Limb) -> Self {
        let side = match limb {
            Limb::Right => 1.0,
            Limb::Left => -1.0,
        };
        Self {
            rest_offset: Vec3::new(0.3 * side, -0.1, 0.05),
            height_offset: 0.25,
            normal_offset: 0.0,
            speed: LimbSpeed::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("speed.set", self.speed.set)?;
        ConfigError::require_positive("speed.reset", self.speed.reset)?;
        Ok(())
    }
}

/// Hand placement configuration.
#[derive(Debug, Clone)]
pub struct HandIkConfig {
    /// Contacts whose local depth is below this are behind the character. Default: -0.4.
    pub rejection_depth: f32,
    pub right: LimbConfig,
    pub left: LimbConfig,
}

impl Default for HandIkConfig {
    fn default() -> Self {
        Self {
            rejection_depth: -0.4,
            right: LimbConfig::for_limb(Limb::Right),
            left: LimbConfig::for_limb(Limb::Left),
        }
    }
}

impl HandIkConfig {
    pub fn limb(&self, limb: Limb) -> &LimbConfig {
        match limb {
            Limb::Right => &self.right,
            Limb::Left => &self.left,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.rejection_depth.is_finite() {
            return Err(ConfigError::OutOfRange {
                field: "rejection_depth",
                value: self.rejection_depth,
                min: f32::MIN,
                max: f32::MAX,
            });
        }
        self.right.validate()?;
        self.left.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(LocomotionConfig::default().validate().is_ok());
        assert!(AgentConfig::default().validate().is_ok());
        assert!(HandIkConfig::default().validate().is_ok());
    }

    #[test]
    fn test_locomotion_defaults() {
        let config = LocomotionConfig::default();
        assert_eq!(config.speed, 3.0);
        assert_eq!(config.acceleration, 4.0);
        assert_eq!(config.destination_tolerance, 0.15);
    }

    #[test]
    fn test_rest_offsets_are_mirrored() {
        let config = HandIkConfig::default();
        assert_eq!(config.right.rest_offset.x, -config.left.rest_offset.x);
        assert_eq!(config.right.rest_offset.y, config.left.rest_offset.y);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = LocomotionConfig::default().with_speed(0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "speed", .. })
        ));

        let mut config = HandIkConfig::default();
        config.left.speed.reset = -1.0;
        assert!(config.validate().is_err());
    }
}
