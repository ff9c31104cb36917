//! User-editable settings for a [`FacingOverride`](crate::coordinator::FacingOverride)

use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

use crate::axonometry::Axonometry;

/// Axis used to turn the character when none is configured
pub const DEFAULT_HORIZONTAL_AXIS: &str = "Horizontal";

/// Axis used to move the character when none is configured
pub const DEFAULT_VERTICAL_AXIS: &str = "Vertical";

/// Settings shared by the facing and locomotion strategies of an override
///
/// Every field may be edited freely; call [`OverrideConfig::normalize`]
/// (or hand the config to [`FacingOverride::configure`](crate::coordinator::FacingOverride::configure))
/// to bring it back into its valid ranges.
///
/// ```rust
/// use facing_override::config::OverrideConfig;
///
/// let config = OverrideConfig {
///     rotation_smoothing: 3.0,
///     rotation_smooth_time: 0.0,
///     turn_speed: -90.0,
///     horizontal_axis: "  ".to_string(),
///     ..Default::default()
/// }
/// .normalized();
///
/// assert_eq!(config.rotation_smoothing, 1.0);
/// assert_eq!(config.rotation_smooth_time, 0.01);
/// assert_eq!(config.turn_speed, 0.0);
/// assert_eq!(config.horizontal_axis, "Horizontal");
/// ```
#[derive(Debug, Clone, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideConfig {
    /// How much of [`rotation_smooth_time`](Self::rotation_smooth_time) is applied, in `[0, 1]`
    ///
    /// Zero snaps the heading to its target every tick.
    pub rotation_smoothing: f32,

    /// Time for the heading to catch up with its target, in seconds, within `[0.01, 0.5]`
    pub rotation_smooth_time: f32,

    /// How fast the horizontal axis turns the target heading, in degrees per second
    pub turn_speed: f32,

    /// Name of the input axis that turns the character
    pub horizontal_axis: String,

    /// Name of the input axis that moves the character forward and backward
    pub vertical_axis: String,

    /// Remapping applied to the final facing direction
    #[reflect(ignore)]
    pub axonometry: Axonometry,
}

impl OverrideConfig {
    /// Valid range of [`rotation_smoothing`](Self::rotation_smoothing)
    pub const SMOOTHING_RANGE: (f32, f32) = (0.0, 1.0);

    /// Valid range of [`rotation_smooth_time`](Self::rotation_smooth_time)
    pub const SMOOTH_TIME_RANGE: (f32, f32) = (0.01, 0.5);

    /// Default [`rotation_smoothing`](Self::rotation_smoothing)
    pub const DEFAULT_SMOOTHING: f32 = 0.5;

    /// Default [`rotation_smooth_time`](Self::rotation_smooth_time)
    pub const DEFAULT_SMOOTH_TIME: f32 = 0.12;

    /// Default [`turn_speed`](Self::turn_speed)
    pub const DEFAULT_TURN_SPEED: f32 = 180.0;

    /// Clamps every numeric field into its range and restores blank axis names
    ///
    /// NaN values are replaced by the field's default.
    pub fn normalize(&mut self) {
        let (min, max) = Self::SMOOTHING_RANGE;
        self.rotation_smoothing =
            finite_or(self.rotation_smoothing, Self::DEFAULT_SMOOTHING).clamp(min, max);

        let (min, max) = Self::SMOOTH_TIME_RANGE;
        self.rotation_smooth_time =
            finite_or(self.rotation_smooth_time, Self::DEFAULT_SMOOTH_TIME).clamp(min, max);

        self.turn_speed = if self.turn_speed.is_nan() {
            Self::DEFAULT_TURN_SPEED
        } else {
            self.turn_speed.clamp(0.0, f32::MAX)
        };

        if self.horizontal_axis.trim().is_empty() {
            self.horizontal_axis = DEFAULT_HORIZONTAL_AXIS.to_string();
        }

        if self.vertical_axis.trim().is_empty() {
            self.vertical_axis = DEFAULT_VERTICAL_AXIS.to_string();
        }
    }

    /// Returns a normalized copy of `self`
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Replaces the [`axonometry`](Self::axonometry)
    #[must_use]
    pub fn with_axonometry(mut self, axonometry: impl Into<Axonometry>) -> Self {
        self.axonometry = axonometry.into();
        self
    }
}

impl Default for OverrideConfig {
    fn default() -> Self {
        Self {
            rotation_smoothing: Self::DEFAULT_SMOOTHING,
            rotation_smooth_time: Self::DEFAULT_SMOOTH_TIME,
            turn_speed: Self::DEFAULT_TURN_SPEED,
            horizontal_axis: DEFAULT_HORIZONTAL_AXIS.to_string(),
            vertical_axis: DEFAULT_VERTICAL_AXIS.to_string(),
            axonometry: Axonometry::None,
        }
    }
}

#[inline]
fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
