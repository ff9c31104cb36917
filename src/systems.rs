//! The systems that power the [`FacingOverridePlugin`](crate::plugin::FacingOverridePlugin).

use bevy::ecs::prelude::*;
use bevy::log::debug;
use bevy::math::{Quat, Vec3};
use bevy::time::Time;
use bevy::transform::components::Transform;

use crate::bevy_host::{CharacterMotor, CharacterView, InputAxes, OverrideRotation};
use crate::host::{lock_unit, CharacterBody, TickContext};
use crate::kernel::{Kernel, StrategyKernel};
use crate::smoothing::yaw_from_direction;

/// Starts or stops every [`OverrideRotation`] that was added or changed since the last frame
///
/// The configuration is normalized first, so edits made while the override is active apply immediately
/// without swapping any strategy.
/// Entities missing a [`CharacterMotor`] or [`Kernel`] are reported and left alone
/// until the component changes again.
pub fn sync_overrides(
    mut query: Query<(
        Entity,
        &mut OverrideRotation,
        Option<&Transform>,
        Option<&mut CharacterMotor>,
        Option<&mut Kernel>,
    )>,
) {
    for (entity, mut rotation_override, transform, mut motor, mut kernel) in query.iter_mut() {
        if !rotation_override.is_changed() {
            continue;
        }

        // Our own bookkeeping must not count as an edit next frame
        let rotation_override = rotation_override.bypass_change_detection();
        let enabled = rotation_override.enabled;
        let coordinator = rotation_override.coordinator_mut();
        coordinator.on_config_changed();

        let mut view = motor
            .as_deref_mut()
            .map(|motor| CharacterView::new(transform.copied(), motor));
        let character = view
            .as_mut()
            .map(|view| view as &mut dyn CharacterBody);
        let kernel = kernel
            .as_deref_mut()
            .map(|kernel| kernel as &mut dyn StrategyKernel);

        // Config-only edits are handled above and must not reinstall anything
        match (enabled, coordinator.is_applied()) {
            (true, false) => {
                if let Err(error) = coordinator.start(character, kernel) {
                    debug!("Override on {entity:?} stays inactive until it changes again: {error}");
                }
            }
            (false, true) => coordinator.stop(character, kernel),
            _ => {}
        }
    }
}

/// Runs the facing and player strategies installed in every character's [`Kernel`]
///
/// Both strategies see the same snapshot of the character's transform.
/// The facing direction is then applied as the character's yaw.
pub fn tick_kernels(
    time: Res<Time>,
    input: Res<InputAxes>,
    mut query: Query<(&mut Transform, &mut CharacterMotor, &Kernel)>,
) {
    let delta_seconds = time.delta_seconds();

    for (mut transform, mut motor, kernel) in query.iter_mut() {
        let snapshot = *transform;
        let mut view = CharacterView::new(Some(snapshot), &mut motor);
        let mut tick = TickContext::new(delta_seconds, &*input, Some(&mut view));

        let facing = kernel
            .facing()
            .map(|unit| lock_unit(&unit).direction(&mut tick));

        if let Some(unit) = kernel.player() {
            lock_unit(&unit).update(&mut tick);
        }

        if let Some(yaw) = facing.and_then(yaw_from_direction) {
            let rotation = Quat::from_rotation_y(yaw.to_radians());
            if transform.rotation != rotation {
                transform.rotation = rotation;
            }
        }
    }
}

/// Moves every character according to the last [`MotionCommand`](crate::bevy_host::MotionCommand) it received
pub fn apply_motion(time: Res<Time>, mut query: Query<(&mut Transform, &CharacterMotor)>) {
    let delta_seconds = time.delta_seconds();

    for (mut transform, motor) in query.iter_mut() {
        let velocity = motor.motion.world_velocity(&transform);
        if velocity != Vec3::ZERO {
            transform.translation += velocity * delta_seconds;
        }
    }
}

/// Restores a character's previous strategies when its [`OverrideRotation`] is removed or despawned
pub fn restore_on_remove(
    trigger: Trigger<OnRemove, OverrideRotation>,
    mut query: Query<(
        &mut OverrideRotation,
        Option<&Transform>,
        Option<&mut CharacterMotor>,
        Option<&mut Kernel>,
    )>,
) {
    let Ok((mut rotation_override, transform, mut motor, mut kernel)) =
        query.get_mut(trigger.entity())
    else {
        return;
    };

    let mut view = motor
        .as_deref_mut()
        .map(|motor| CharacterView::new(transform.copied(), motor));
    let character = view
        .as_mut()
        .map(|view| view as &mut dyn CharacterBody);
    let kernel = kernel
        .as_deref_mut()
        .map(|kernel| kernel as &mut dyn StrategyKernel);

    rotation_override
        .coordinator_mut()
        .destroy(character, kernel);
}
