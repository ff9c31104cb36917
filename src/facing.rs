//! Facing driven by a horizontal input axis

use bevy::math::Vec3;

use crate::axonometry::Axonometry;
use crate::config::OverrideConfig;
use crate::host::{CharacterBody, FacingUnit, TickContext};
use crate::smoothing::{
    flat_forward, forward_from_yaw, repeat, smooth_damp_angle, yaw_from_direction, FORWARD,
    MIN_SMOOTH_TIME,
};

/// Axis values at or below this magnitude are ignored
pub const INPUT_THRESHOLD: f32 = 0.0001;

/// A [`FacingUnit`] that turns the character with a horizontal axis, tank-style
///
/// The axis rotates a target heading at [`turn_speed`](OverrideConfig::turn_speed) degrees per second,
/// and the character's heading follows it through a critically damped filter.
///
/// ```rust
/// use bevy::math::Vec3;
/// use facing_override::config::OverrideConfig;
/// use facing_override::facing::AxisFacing;
/// use facing_override::host::{AxisSource, FacingUnit, TickContext};
///
/// struct HoldRight;
///
/// impl AxisSource for HoldRight {
///     fn axis_raw(&self, name: &str) -> f32 {
///         if name == "Horizontal" { 1.0 } else { 0.0 }
///     }
/// }
///
/// let mut facing = AxisFacing::default();
/// facing.configure(&OverrideConfig {
///     rotation_smoothing: 0.0,
///     turn_speed: 90.0,
///     ..Default::default()
/// });
///
/// // A full second of input at 90 degrees per second, with no smoothing
/// let mut tick = TickContext::new(1.0, &HoldRight, None);
/// let direction = facing.direction(&mut tick);
///
/// assert!((facing.target_yaw() - 90.0).abs() < 1e-4);
/// assert!(direction.abs_diff_eq(Vec3::X, 1e-5));
/// ```
#[derive(Debug, Clone)]
pub struct AxisFacing {
    rotation_smoothing: f32,
    rotation_smooth_time: f32,
    turn_speed: f32,
    horizontal_axis: String,
    axonometry: Axonometry,

    velocity: f32,
    target_yaw: f32,
    direction: Vec3,
}

impl Default for AxisFacing {
    fn default() -> Self {
        let config = OverrideConfig::default();
        Self {
            rotation_smoothing: config.rotation_smoothing,
            rotation_smooth_time: config.rotation_smooth_time,
            turn_speed: config.turn_speed,
            horizontal_axis: config.horizontal_axis,
            axonometry: config.axonometry,
            velocity: 0.0,
            target_yaw: 0.0,
            direction: FORWARD,
        }
    }
}

impl AxisFacing {
    /// Copies the facing-related settings out of `config`
    ///
    /// Numeric values are clamped into their ranges; axis names are taken as they are,
    /// so an empty name leaves the strategy without input.
    /// The accumulated heading is preserved.
    pub fn configure(&mut self, config: &OverrideConfig) {
        let (min, max) = OverrideConfig::SMOOTHING_RANGE;
        self.rotation_smoothing = config.rotation_smoothing.clamp(min, max);

        let (min, max) = OverrideConfig::SMOOTH_TIME_RANGE;
        self.rotation_smooth_time = config.rotation_smooth_time.clamp(min, max);

        self.turn_speed = config.turn_speed.max(0.0);
        self.horizontal_axis.clone_from(&config.horizontal_axis);
        self.axonometry = config.axonometry.clone();
    }

    /// The heading the character is turning toward, in degrees within `[0, 360)`
    #[must_use]
    #[inline]
    pub fn target_yaw(&self) -> f32 {
        self.target_yaw
    }

    /// The current smoothed heading, in degrees within `[0, 360)`
    #[must_use]
    pub fn yaw(&self) -> f32 {
        yaw_from_direction(self.direction).unwrap_or(0.0)
    }

    /// The current angular velocity of the smoothing filter, in degrees per second
    #[must_use]
    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// The smoothed heading as a horizontal unit vector, before the axonometry is applied
    #[must_use]
    #[inline]
    pub fn raw_direction(&self) -> Vec3 {
        self.direction
    }

    /// The name of the axis that turns the character
    #[must_use]
    pub fn horizontal_axis(&self) -> &str {
        &self.horizontal_axis
    }

    /// Advances the heading by `delta_seconds` given the horizontal axis value `horizontal`
    ///
    /// Returns the new smoothed heading as a horizontal unit vector.
    pub fn advance(&mut self, horizontal: f32, delta_seconds: f32) -> Vec3 {
        if horizontal.abs() > INPUT_THRESHOLD && self.turn_speed > 0.0 {
            self.target_yaw += horizontal * self.turn_speed * delta_seconds;
        }
        self.target_yaw = repeat(self.target_yaw, 360.0);

        let yaw = if self.rotation_smoothing <= 0.0 {
            self.velocity = 0.0;
            self.target_yaw
        } else {
            let smooth_time =
                (self.rotation_smooth_time * self.rotation_smoothing).max(MIN_SMOOTH_TIME);
            smooth_damp_angle(
                self.yaw(),
                self.target_yaw,
                &mut self.velocity,
                smooth_time,
                f32::INFINITY,
                delta_seconds,
            )
        };

        self.direction = forward_from_yaw(yaw);
        self.direction
    }
}

impl FacingUnit for AxisFacing {
    fn direction(&mut self, tick: &mut TickContext) -> Vec3 {
        let horizontal = tick.axis_raw(&self.horizontal_axis);
        let direction = self.advance(horizontal, tick.delta_seconds);
        self.axonometry.process_direction(direction)
    }

    fn reset(&mut self, character: Option<&dyn CharacterBody>) {
        let forward = character
            .and_then(|character| character.transform())
            .and_then(|transform| flat_forward(transform.rotation));

        self.velocity = 0.0;
        self.direction = forward.unwrap_or(FORWARD);
        self.target_yaw = forward.and_then(yaw_from_direction).unwrap_or(0.0);
    }
}
