//! Error types.

use glam::Vec3;
use thiserror::Error;

/// A navigation query could not produce a usable route.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
    /// No route exists between the two points.
    #[error("no navigable route from {from} to {to}")]
    NoRoute { from: Vec3, to: Vec3 },
    /// The query succeeded but returned no corners.
    #[error("navigation query returned an empty path")]
    EmptyPath,
}

/// Invalid tuning value in one of the configuration structs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite and positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl ConfigError {
    pub(crate) fn require_positive(field: &'static str, value: f32) -> Result<(), Self> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(Self::NotPositive { field, value })
        }
    }

    pub(crate) fn require_non_negative(field: &'static str, value: f32) -> Result<(), Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(Self::Negative { field, value })
        }
    }

    pub(crate) fn require_range(
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    ) -> Result<(), Self> {
        if value.is_finite() && (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Self::OutOfRange {
                field,
                value,
                min,
                max,
            })
        }
    }
}
