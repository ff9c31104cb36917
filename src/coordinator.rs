//! Installs the axis-driven strategies into a kernel and puts the old ones back afterwards

use std::sync::{Arc, Mutex, Weak};

use bevy::log::{debug, warn};

use crate::config::OverrideConfig;
use crate::errors::OverrideError;
use crate::facing::AxisFacing;
use crate::host::{lock_unit, same_unit, CharacterBody, FacingUnit, PlayerUnit};
use crate::kernel::StrategyKernel;
use crate::locomotion::AxisLocomotion;

/// Temporarily replaces a character's facing and player strategies with [`AxisFacing`] and [`AxisLocomotion`]
///
/// The host drives an override through four entry points:
///
/// - [`start`](Self::start) when the override is first enabled and every time it is re-enabled
/// - [`stop`](Self::stop) when it is disabled
/// - [`destroy`](Self::destroy) when it is removed for good
/// - [`on_config_changed`](Self::on_config_changed) whenever its configuration is edited
///
/// The strategies that were installed before the first [`start`](Self::start) are remembered weakly,
/// and are only restored into slots that still hold this override's strategies,
/// so strategies installed by someone else in the meantime are never clobbered.
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use bevy::math::Vec3;
/// use bevy::transform::components::Transform;
/// use facing_override::coordinator::FacingOverride;
/// use facing_override::host::{CharacterBody, FacingUnit, SharedFacing, Space, TickContext};
/// use facing_override::kernel::{Kernel, StrategyKernel};
///
/// struct Still;
///
/// impl FacingUnit for Still {
///     fn direction(&mut self, _tick: &mut TickContext) -> Vec3 {
///         Vec3::Z
///     }
/// }
///
/// struct Dummy;
///
/// impl CharacterBody for Dummy {
///     fn transform(&self) -> Option<Transform> { Some(Transform::IDENTITY) }
///     fn is_player(&self) -> bool { true }
///     fn is_controllable(&self) -> bool { true }
///     fn linear_speed(&self) -> f32 { 4.0 }
///     fn move_to_direction(&mut self, _velocity: Vec3, _space: Space, _priority: i32) {}
/// }
///
/// let home: SharedFacing = Arc::new(Mutex::new(Still));
/// let mut kernel = Kernel::default().with_facing(home.clone());
/// let mut character = Dummy;
///
/// let mut rotation_override = FacingOverride::default();
/// rotation_override.start(Some(&mut character), Some(&mut kernel)).unwrap();
/// assert!(!Arc::ptr_eq(&kernel.facing().unwrap(), &home));
///
/// rotation_override.stop(Some(&mut character), Some(&mut kernel));
/// assert!(Arc::ptr_eq(&kernel.facing().unwrap(), &home));
/// ```
#[derive(Debug, Default)]
pub struct FacingOverride {
    config: OverrideConfig,
    facing: Option<Arc<Mutex<AxisFacing>>>,
    player: Option<Arc<Mutex<AxisLocomotion>>>,
    previous_facing: Option<Weak<Mutex<dyn FacingUnit>>>,
    previous_player: Option<Weak<Mutex<dyn PlayerUnit>>>,
    applied: bool,
}

impl FacingOverride {
    /// Creates an inactive override with the given configuration
    #[must_use]
    pub fn new(config: OverrideConfig) -> Self {
        Self {
            config: config.normalized(),
            ..Default::default()
        }
    }

    /// The current configuration
    #[must_use]
    #[inline]
    pub fn config(&self) -> &OverrideConfig {
        &self.config
    }

    /// Mutable access to the configuration
    ///
    /// Call [`on_config_changed`](Self::on_config_changed) once done editing.
    #[must_use]
    #[inline]
    pub fn config_mut(&mut self) -> &mut OverrideConfig {
        &mut self.config
    }

    /// Replaces the configuration, normalizing it and passing it on to the strategies
    ///
    /// The kernel is left untouched, whether or not the override is active.
    pub fn configure(&mut self, config: OverrideConfig) {
        self.config = config;
        self.on_config_changed();
    }

    /// Normalizes the configuration after an edit and passes it on to the strategies
    pub fn on_config_changed(&mut self) {
        self.config.normalize();
        self.reconfigure();
    }

    /// Passes the current configuration on to the strategies, if they exist yet
    pub fn reconfigure(&mut self) {
        if let Some(facing) = &self.facing {
            lock_unit(facing).configure(&self.config);
        }

        if let Some(player) = &self.player {
            lock_unit(player).configure(&self.config);
        }
    }

    /// Are this override's strategies meant to be installed?
    #[must_use]
    #[inline]
    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// The facing strategy owned by this override, once it has been started
    #[must_use]
    pub fn facing(&self) -> Option<&Arc<Mutex<AxisFacing>>> {
        self.facing.as_ref()
    }

    /// The player strategy owned by this override, once it has been started
    #[must_use]
    pub fn player(&self) -> Option<&Arc<Mutex<AxisLocomotion>>> {
        self.player.as_ref()
    }

    /// Installs this override's strategies into `kernel`
    ///
    /// The strategies are created on first use and reconfigured on every call.
    /// Whatever the kernel held before is remembered, unless the override is already applied.
    ///
    /// # Errors
    ///
    /// Returns an [`OverrideError`] without changing anything if `character` or `kernel` is missing.
    pub fn start(
        &mut self,
        character: Option<&mut dyn CharacterBody>,
        kernel: Option<&mut dyn StrategyKernel>,
    ) -> Result<(), OverrideError> {
        let Some(character) = character else {
            warn!("Cannot override rotation: {}", OverrideError::MissingCharacter);
            return Err(OverrideError::MissingCharacter);
        };
        let Some(kernel) = kernel else {
            warn!("Cannot override rotation: {}", OverrideError::MissingKernel);
            return Err(OverrideError::MissingKernel);
        };

        let facing = self
            .facing
            .get_or_insert_with(|| {
                let mut unit = AxisFacing::default();
                unit.reset(Some(&*character));
                Arc::new(Mutex::new(unit))
            })
            .clone();
        let player = self
            .player
            .get_or_insert_with(|| Arc::new(Mutex::new(AxisLocomotion::default())))
            .clone();
        self.reconfigure();

        if !self.applied {
            self.previous_facing = kernel.facing().as_ref().map(Arc::downgrade);
            self.previous_player = kernel.player().as_ref().map(Arc::downgrade);
        }

        if !kernel
            .facing()
            .is_some_and(|current| same_unit(&current, &facing))
        {
            kernel.change_facing(facing);
        }

        if !kernel
            .player()
            .is_some_and(|current| same_unit(&current, &player))
        {
            kernel.change_player(player);
        }

        self.applied = true;
        Ok(())
    }

    /// Puts the kernel's previous strategies back and resets this override's strategies
    ///
    /// Slots that no longer hold this override's strategies are left alone.
    /// Does nothing if the override is not applied, or if `character` or `kernel` is missing.
    pub fn stop(
        &mut self,
        character: Option<&mut dyn CharacterBody>,
        kernel: Option<&mut dyn StrategyKernel>,
    ) {
        if !self.applied {
            return;
        }
        let (Some(character), Some(kernel)) = (character, kernel) else {
            return;
        };

        if let Some(facing) = &self.facing {
            let installed = kernel
                .facing()
                .is_some_and(|current| same_unit(&current, facing));
            let previous = self.previous_facing.as_ref().and_then(Weak::upgrade);

            match (installed, previous) {
                (true, Some(previous)) => kernel.change_facing(previous),
                (false, _) => {
                    debug!("Facing strategy was replaced by someone else; not restoring");
                }
                (true, None) => {}
            }
        }

        if let Some(player) = &self.player {
            let installed = kernel
                .player()
                .is_some_and(|current| same_unit(&current, player));
            let previous = self.previous_player.as_ref().and_then(Weak::upgrade);

            match (installed, previous) {
                (true, Some(previous)) => kernel.change_player(previous),
                (false, _) => {
                    debug!("Player strategy was replaced by someone else; not restoring");
                }
                (true, None) => {}
            }
        }

        if let Some(facing) = &self.facing {
            lock_unit(facing).reset(Some(&*character));
        }

        if let Some(player) = &self.player {
            lock_unit(player).reset(Some(character));
        }

        self.applied = false;
    }

    /// Tears the override down for good
    ///
    /// This restores the kernel exactly like [`stop`](Self::stop).
    pub fn destroy(
        &mut self,
        character: Option<&mut dyn CharacterBody>,
        kernel: Option<&mut dyn StrategyKernel>,
    ) {
        self.stop(character, kernel);
    }
}
