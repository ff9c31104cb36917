//! Forward-only locomotion driven by a vertical input axis

use bevy::math::Vec3;

use crate::config::OverrideConfig;
use crate::facing::INPUT_THRESHOLD;
use crate::host::{CharacterBody, PlayerUnit, Space, TickContext};
use crate::smoothing::{flat_forward, FORWARD};

/// A [`PlayerUnit`] that moves the character along its own forward axis
///
/// The vertical axis moves the character forward (positive) or backward (negative).
/// There is no strafing and no turning: pair it with [`AxisFacing`](crate::facing::AxisFacing) to steer.
#[derive(Debug, Clone)]
pub struct AxisLocomotion {
    vertical_axis: String,
    input_direction: Vec3,
}

impl Default for AxisLocomotion {
    fn default() -> Self {
        Self {
            vertical_axis: OverrideConfig::default().vertical_axis,
            input_direction: Vec3::ZERO,
        }
    }
}

impl AxisLocomotion {
    /// Copies the locomotion-related settings out of `config`
    ///
    /// An empty axis name is kept as is and leaves the strategy without input.
    pub fn configure(&mut self, config: &OverrideConfig) {
        self.vertical_axis.clone_from(&config.vertical_axis);
    }

    /// The direction computed during the last tick, scaled by the input magnitude
    #[must_use]
    #[inline]
    pub fn input_direction(&self) -> Vec3 {
        self.input_direction
    }

    /// The name of the axis that moves the character
    #[must_use]
    pub fn vertical_axis(&self) -> &str {
        &self.vertical_axis
    }
}

impl PlayerUnit for AxisLocomotion {
    fn update(&mut self, tick: &mut TickContext) {
        self.input_direction = Vec3::ZERO;

        let vertical = tick.axis_raw(&self.vertical_axis);
        let Some(character) = tick.character.as_deref_mut() else {
            return;
        };
        if !character.is_player() || !character.is_controllable() {
            return;
        }

        let magnitude = vertical.abs().clamp(0.0, 1.0);
        if magnitude <= INPUT_THRESHOLD {
            character.move_to_direction(Vec3::ZERO, Space::World, 0);
            return;
        }

        let forward = character
            .transform()
            .and_then(|transform| flat_forward(transform.rotation))
            .unwrap_or(FORWARD);

        self.input_direction = forward * vertical.signum() * magnitude;
        let speed = character.linear_speed();
        character.move_to_direction(self.input_direction * speed, Space::World, 0);
    }

    fn reset(&mut self, character: Option<&mut dyn CharacterBody>) {
        self.input_direction = Vec3::ZERO;

        if let Some(character) = character {
            character.move_to_direction(Vec3::ZERO, Space::World, 0);
        }
    }
}
