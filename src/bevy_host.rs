//! Components and resources that let a Bevy app host overrides
//!
//! A character is an entity with a [`Transform`], a [`CharacterMotor`] and a [`Kernel`](crate::kernel::Kernel).
//! Adding an [`OverrideRotation`] to it installs the axis-driven strategies;
//! see [`FacingOverridePlugin`](crate::plugin::FacingOverridePlugin) for the systems that make this happen.

use bevy::ecs::prelude::{Component, Resource};
use bevy::math::Vec3;
use bevy::transform::components::Transform;
use bevy::utils::HashMap;

use crate::config::OverrideConfig;
use crate::coordinator::FacingOverride;
use crate::host::{AxisSource, CharacterBody, Space};

/// Raw values of named input axes, refreshed by the app every frame
///
/// Axes that were never set read as zero.
///
/// ```rust
/// use facing_override::bevy_host::InputAxes;
/// use facing_override::host::AxisSource;
///
/// let mut axes = InputAxes::default();
/// axes.set("Horizontal", 0.5);
///
/// assert_eq!(axes.axis_raw("Horizontal"), 0.5);
/// assert_eq!(axes.axis_raw("Vertical"), 0.0);
/// ```
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct InputAxes {
    values: HashMap<String, f32>,
}

impl InputAxes {
    /// Sets the raw value of the axis called `name`
    pub fn set(&mut self, name: impl Into<String>, value: f32) {
        self.values.insert(name.into(), value);
    }

    /// The raw value of the axis called `name`, if it was set
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }

    /// Releases every axis
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl AxisSource for InputAxes {
    fn axis_raw(&self, name: &str) -> f32 {
        self.get(name).unwrap_or_default()
    }
}

/// A request to move at a given velocity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionCommand {
    /// Velocity in units per second
    pub velocity: Vec3,
    /// The frame `velocity` is expressed in
    pub space: Space,
    /// How the command blends with others; zero applies it immediately
    pub priority: i32,
}

impl MotionCommand {
    /// A command that brings the character to a halt
    pub const STOP: MotionCommand = MotionCommand {
        velocity: Vec3::ZERO,
        space: Space::World,
        priority: 0,
    };

    /// The velocity of this command in world space, given the character's `transform`
    #[must_use]
    pub fn world_velocity(&self, transform: &Transform) -> Vec3 {
        match self.space {
            Space::World => self.velocity,
            Space::Local => transform.rotation * self.velocity,
        }
    }
}

/// The motion-related state of a character
#[derive(Component, Debug, Clone, PartialEq)]
pub struct CharacterMotor {
    /// Movement speed, in units per second
    pub linear_speed: f32,
    /// Is this the character controlled by the local player?
    pub is_player: bool,
    /// Is player control currently allowed?
    pub is_controllable: bool,
    /// The last motion command received
    pub motion: MotionCommand,
}

impl Default for CharacterMotor {
    fn default() -> Self {
        Self {
            linear_speed: 4.0,
            is_player: true,
            is_controllable: true,
            motion: MotionCommand::STOP,
        }
    }
}

impl CharacterMotor {
    /// A motor for the local player moving at `linear_speed`
    #[must_use]
    pub fn player(linear_speed: f32) -> Self {
        Self {
            linear_speed,
            ..Default::default()
        }
    }
}

/// A [`CharacterBody`] borrowed from a character entity for the duration of a tick
///
/// The transform is a snapshot: strategies observe the character as it was when the tick began.
pub struct CharacterView<'a> {
    transform: Option<Transform>,
    motor: &'a mut CharacterMotor,
}

impl<'a> CharacterView<'a> {
    /// Views a character through its transform and motor
    pub fn new(transform: Option<Transform>, motor: &'a mut CharacterMotor) -> Self {
        Self { transform, motor }
    }
}

impl CharacterBody for CharacterView<'_> {
    fn transform(&self) -> Option<Transform> {
        self.transform
    }

    fn is_player(&self) -> bool {
        self.motor.is_player
    }

    fn is_controllable(&self) -> bool {
        self.motor.is_controllable
    }

    fn linear_speed(&self) -> f32 {
        self.motor.linear_speed
    }

    fn move_to_direction(&mut self, velocity: Vec3, space: Space, priority: i32) {
        self.motor.motion = MotionCommand {
            velocity,
            space,
            priority,
        };
    }
}

/// Overrides the facing and locomotion of the character it is attached to
///
/// While [`enabled`](Self::enabled) is set, the character's kernel runs
/// [`AxisFacing`](crate::facing::AxisFacing) and [`AxisLocomotion`](crate::locomotion::AxisLocomotion).
/// Clearing it, or removing the component, restores the strategies the kernel had before.
///
/// Configuration edits made through [`config_mut`](Self::config_mut) are picked up on the next frame.
#[derive(Component, Debug)]
pub struct OverrideRotation {
    /// Should the override be installed?
    pub enabled: bool,
    coordinator: FacingOverride,
}

impl Default for OverrideRotation {
    fn default() -> Self {
        Self::new(OverrideConfig::default())
    }
}

impl OverrideRotation {
    /// An enabled override using `config`
    #[must_use]
    pub fn new(config: OverrideConfig) -> Self {
        Self {
            enabled: true,
            coordinator: FacingOverride::new(config),
        }
    }

    /// The configuration in use
    #[must_use]
    pub fn config(&self) -> &OverrideConfig {
        self.coordinator.config()
    }

    /// Mutable access to the configuration
    pub fn config_mut(&mut self) -> &mut OverrideConfig {
        self.coordinator.config_mut()
    }

    /// The coordinator doing the actual work
    #[must_use]
    pub fn coordinator(&self) -> &FacingOverride {
        &self.coordinator
    }

    /// Mutable access to the coordinator
    pub fn coordinator_mut(&mut self) -> &mut FacingOverride {
        &mut self.coordinator
    }
}
