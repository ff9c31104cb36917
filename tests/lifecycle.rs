use std::sync::{Arc, Mutex};
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::MinimalPlugins;
use facing_override::host::{same_unit, Capability};
use facing_override::prelude::*;

/// The character's own facing strategy: always looks toward -Z
struct FaceBackward;

impl FacingUnit for FaceBackward {
    fn direction(&mut self, _tick: &mut TickContext) -> Vec3 {
        Vec3::NEG_Z
    }
}

/// The character's own player strategy: never moves
struct Idle;

impl PlayerUnit for Idle {
    fn update(&mut self, _tick: &mut TickContext) {}
}

fn build_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(FacingOverridePlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            1.0 / 60.0,
        )));

    // we have to set an initial time for TimeUpdateStrategy::ManualDuration to work properly
    let startup = app.world().resource::<Time<Real>>().startup();
    app.world_mut()
        .resource_mut::<Time<Real>>()
        .update_with_instant(startup);
    app
}

fn spawn_character(app: &mut App, rotation_override: Option<OverrideRotation>) -> Entity {
    let kernel = Kernel::new(Arc::new(Mutex::new(FaceBackward)), Arc::new(Mutex::new(Idle)));
    let mut entity = app
        .world_mut()
        .spawn((Transform::default(), CharacterMotor::player(5.0), kernel));

    if let Some(rotation_override) = rotation_override {
        entity.insert(rotation_override);
    }
    entity.id()
}

fn kernel(app: &App, entity: Entity) -> &Kernel {
    app.world().get::<Kernel>(entity).unwrap()
}

fn rotation_override(app: &App, entity: Entity) -> &OverrideRotation {
    app.world().get::<OverrideRotation>(entity).unwrap()
}

fn is_overridden(app: &App, entity: Entity) -> bool {
    let kernel = kernel(app, entity);
    let coordinator = rotation_override(app, entity).coordinator();

    match (coordinator.facing(), coordinator.player()) {
        (Some(facing), Some(player)) => {
            same_unit(&kernel.facing().unwrap(), facing)
                && same_unit(&kernel.player().unwrap(), player)
        }
        _ => false,
    }
}

#[test]
fn adding_the_component_installs_the_override() {
    let mut app = build_app();
    let entity = spawn_character(&mut app, Some(OverrideRotation::default()));

    app.update();

    assert!(rotation_override(&app, entity).coordinator().is_applied());
    assert!(is_overridden(&app, entity));
    assert_eq!(kernel(&app, entity).revision(), 2);

    // Staying enabled does not swap anything again
    app.update();
    app.update();
    assert_eq!(kernel(&app, entity).revision(), 2);
}

#[test]
fn disabling_and_reenabling() {
    let mut app = build_app();
    let entity = spawn_character(&mut app, Some(OverrideRotation::default()));
    app.update();

    app.world_mut()
        .get_mut::<OverrideRotation>(entity)
        .unwrap()
        .enabled = false;
    app.update();

    assert!(!rotation_override(&app, entity).coordinator().is_applied());
    assert!(kernel(&app, entity).is_home(Capability::Facing));
    assert!(kernel(&app, entity).is_home(Capability::Player));

    // The character's own facing strategy is running again
    let transform = app.world().get::<Transform>(entity).unwrap();
    assert!((transform.rotation * Vec3::Z).abs_diff_eq(Vec3::NEG_Z, 1e-5));

    app.world_mut()
        .get_mut::<OverrideRotation>(entity)
        .unwrap()
        .enabled = true;
    app.update();

    assert!(is_overridden(&app, entity));
}

#[test]
fn removing_the_component_restores_the_kernel() {
    let mut app = build_app();
    let entity = spawn_character(&mut app, Some(OverrideRotation::default()));
    app.update();
    assert!(is_overridden(&app, entity));

    app.world_mut()
        .entity_mut(entity)
        .remove::<OverrideRotation>();

    assert!(kernel(&app, entity).is_home(Capability::Facing));
    assert!(kernel(&app, entity).is_home(Capability::Player));

    // The character stays still under its own strategies
    app.update();
    let motor = app.world().get::<CharacterMotor>(entity).unwrap();
    assert_eq!(motor.motion, MotionCommand::STOP);
}

#[test]
fn despawning_an_overridden_character() {
    let mut app = build_app();
    let entity = spawn_character(&mut app, Some(OverrideRotation::default()));
    app.update();

    assert!(app.world_mut().despawn(entity));
    app.update();
}

#[test]
fn foreign_strategies_survive_disabling() {
    let mut app = build_app();
    let entity = spawn_character(&mut app, Some(OverrideRotation::default()));
    app.update();

    let foreign: SharedFacing = Arc::new(Mutex::new(FaceBackward));
    app.world_mut()
        .get_mut::<Kernel>(entity)
        .unwrap()
        .change_facing(foreign.clone());

    app.world_mut()
        .get_mut::<OverrideRotation>(entity)
        .unwrap()
        .enabled = false;
    app.update();

    let kernel = kernel(&app, entity);
    assert!(same_unit(&kernel.facing().unwrap(), &foreign));
    assert!(kernel.is_home(Capability::Player));
}

#[test]
fn missing_kernel_leaves_the_override_inert() {
    let mut app = build_app();
    let entity = app
        .world_mut()
        .spawn((
            Transform::default(),
            CharacterMotor::player(5.0),
            OverrideRotation::default(),
        ))
        .id();

    app.update();
    assert!(!rotation_override(&app, entity).coordinator().is_applied());

    // A later activation attempt picks the kernel up
    app.world_mut().entity_mut(entity).insert(Kernel::default());
    app.world_mut()
        .get_mut::<OverrideRotation>(entity)
        .unwrap()
        .enabled = true;
    app.update();

    assert!(rotation_override(&app, entity).coordinator().is_applied());
    assert!(is_overridden(&app, entity));
}

#[test]
fn configuration_edits_apply_without_swapping() {
    let mut app = build_app();
    let entity = spawn_character(&mut app, Some(OverrideRotation::default()));
    app.update();
    let revision = kernel(&app, entity).revision();

    {
        let mut rotation_override = app.world_mut().get_mut::<OverrideRotation>(entity).unwrap();
        let config = rotation_override.config_mut();
        config.turn_speed = -30.0;
        config.vertical_axis = "Throttle".to_string();
    }
    app.update();

    let coordinator = rotation_override(&app, entity).coordinator();
    assert_eq!(coordinator.config().turn_speed, 0.0);
    assert_eq!(
        coordinator.player().unwrap().lock().unwrap().vertical_axis(),
        "Throttle"
    );
    assert_eq!(kernel(&app, entity).revision(), revision);
    assert!(is_overridden(&app, entity));
}

#[test]
fn configuring_a_disabled_override_installs_nothing() {
    let mut app = build_app();
    let mut disabled = OverrideRotation::default();
    disabled.enabled = false;
    let entity = spawn_character(&mut app, Some(disabled));
    app.update();

    app.world_mut()
        .get_mut::<OverrideRotation>(entity)
        .unwrap()
        .config_mut()
        .rotation_smoothing = 0.0;
    app.update();

    assert_eq!(kernel(&app, entity).revision(), 0);
    assert!(kernel(&app, entity).is_home(Capability::Facing));
    assert_eq!(
        rotation_override(&app, entity).config().rotation_smoothing,
        0.0
    );
}

#[test]
fn configuration_edits_keep_foreign_strategies() {
    let mut app = build_app();
    let entity = spawn_character(&mut app, Some(OverrideRotation::default()));
    app.update();

    let foreign: SharedFacing = Arc::new(Mutex::new(FaceBackward));
    app.world_mut()
        .get_mut::<Kernel>(entity)
        .unwrap()
        .change_facing(foreign.clone());
    let revision = kernel(&app, entity).revision();

    app.world_mut()
        .get_mut::<OverrideRotation>(entity)
        .unwrap()
        .config_mut()
        .turn_speed = 45.0;
    app.update();

    let kernel = kernel(&app, entity);
    assert!(same_unit(&kernel.facing().unwrap(), &foreign));
    assert_eq!(kernel.revision(), revision);

    let coordinator = rotation_override(&app, entity).coordinator();
    assert!(coordinator.is_applied());
    assert_eq!(coordinator.config().turn_speed, 45.0);
}
