//! Contains the main plugin exported by this crate.

use bevy::app::{App, Plugin, Update};
use bevy::ecs::prelude::*;

use crate::bevy_host::InputAxes;

/// A [`Plugin`] that drives [`OverrideRotation`](crate::bevy_host::OverrideRotation) components
/// and the strategy kernels of every character
///
/// A character is an entity with a [`Transform`](bevy::transform::components::Transform),
/// a [`CharacterMotor`](crate::bevy_host::CharacterMotor) and a [`Kernel`](crate::kernel::Kernel).
/// Input is read from the [`InputAxes`] resource, which your app should fill in before [`Update`].
///
/// ## Systems
///
/// **WARNING:** These systems run during [`Update`], in the order listed below.
/// If you have systems that move characters or edit their kernels during this schedule,
/// you must define an ordering between your systems and [`FacingOverrideSystem`] or behavior will be very erratic.
///
/// Complete list:
///
/// - [`sync_overrides`](crate::systems::sync_overrides), which starts or stops overrides whose component was added or changed
///     - labeled [`FacingOverrideSystem::Lifecycle`]
/// - [`tick_kernels`](crate::systems::tick_kernels), which runs each kernel's facing and player strategies
///     - labeled [`FacingOverrideSystem::Tick`]
/// - [`apply_motion`](crate::systems::apply_motion), which moves characters according to their last motion command
///     - labeled [`FacingOverrideSystem::Motion`]
///
/// The [`restore_on_remove`](crate::systems::restore_on_remove) observer tears overrides down when their component is removed,
/// including when the entity is despawned.
#[derive(Debug, Default)]
pub struct FacingOverridePlugin;

impl Plugin for FacingOverridePlugin {
    fn build(&self, app: &mut App) {
        use crate::systems::*;

        app.init_resource::<InputAxes>()
            .configure_sets(
                Update,
                (
                    FacingOverrideSystem::Lifecycle,
                    FacingOverrideSystem::Tick,
                    FacingOverrideSystem::Motion,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    sync_overrides.in_set(FacingOverrideSystem::Lifecycle),
                    tick_kernels.in_set(FacingOverrideSystem::Tick),
                    apply_motion.in_set(FacingOverrideSystem::Motion),
                ),
            )
            .observe(restore_on_remove);
    }
}

/// [`SystemSet`]s for the [`crate::systems`] used by this crate
///
/// `Lifecycle` runs before `Tick`, which runs before `Motion`.
#[derive(SystemSet, Clone, Copy, Hash, Debug, PartialEq, Eq)]
pub enum FacingOverrideSystem {
    /// Installs or restores strategies in response to [`OverrideRotation`](crate::bevy_host::OverrideRotation) changes
    Lifecycle,
    /// Reads input and runs the strategies currently installed in each kernel
    Tick,
    /// Applies the resulting motion commands to character transforms
    Motion,
}
