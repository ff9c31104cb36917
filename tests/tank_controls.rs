use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::MinimalPlugins;
use facing_override::prelude::*;

const FRAME: f32 = 1.0 / 60.0;

fn build_app(config: OverrideConfig) -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(FacingOverridePlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            FRAME,
        )));

    // we have to set an initial time for TimeUpdateStrategy::ManualDuration to work properly
    let startup = app.world().resource::<Time<Real>>().startup();
    app.world_mut()
        .resource_mut::<Time<Real>>()
        .update_with_instant(startup);

    let entity = app
        .world_mut()
        .spawn((
            Transform::default(),
            CharacterMotor::player(5.0),
            Kernel::default(),
            OverrideRotation::new(config),
        ))
        .id();

    (app, entity)
}

fn hold(app: &mut App, axis: &str, value: f32) {
    app.world_mut().resource_mut::<InputAxes>().set(axis, value);
}

fn transform(app: &App, entity: Entity) -> Transform {
    *app.world().get::<Transform>(entity).unwrap()
}

#[test]
fn holding_forward_moves_along_the_facing() {
    let (mut app, entity) = build_app(OverrideConfig::default());
    hold(&mut app, "Vertical", 1.0);

    for _ in 0..60 {
        app.update();
    }

    let transform = transform(&app, entity);
    assert!((transform.translation.z - 5.0).abs() < 1e-2, "{transform:?}");
    assert!(transform.translation.x.abs() < 1e-4);
}

#[test]
fn holding_backward_reverses() {
    let (mut app, entity) = build_app(OverrideConfig::default());
    hold(&mut app, "Vertical", -1.0);
    app.update();

    let motor = app.world().get::<CharacterMotor>(entity).unwrap();
    assert!(motor.motion.velocity.abs_diff_eq(Vec3::NEG_Z * 5.0, 1e-5));
    assert_eq!(motor.motion.space, Space::World);
    assert_eq!(motor.motion.priority, 0);
}

#[test]
fn holding_right_turns_at_turn_speed() {
    let (mut app, entity) = build_app(OverrideConfig {
        rotation_smoothing: 0.0,
        turn_speed: 90.0,
        ..Default::default()
    });
    hold(&mut app, "Horizontal", 1.0);

    for _ in 0..60 {
        app.update();
    }

    let forward = transform(&app, entity).rotation * Vec3::Z;
    assert!(forward.abs_diff_eq(Vec3::X, 1e-3), "{forward}");
}

#[test]
fn smoothed_turning_lags_behind() {
    let (mut app, entity) = build_app(OverrideConfig {
        rotation_smoothing: 1.0,
        rotation_smooth_time: 0.5,
        turn_speed: 90.0,
        ..Default::default()
    });
    hold(&mut app, "Horizontal", 1.0);

    for _ in 0..30 {
        app.update();
    }

    let rotation_override = app.world().get::<OverrideRotation>(entity).unwrap();
    let facing = rotation_override.coordinator().facing().unwrap().lock().unwrap();
    assert!((facing.target_yaw() - 45.0).abs() < 1e-2);

    let forward = transform(&app, entity).rotation * Vec3::Z;
    let yaw = forward.x.atan2(forward.z).to_degrees();
    assert!(yaw > 0.0 && yaw < 45.0, "{yaw}");
}

#[test]
fn turning_then_driving_follows_the_new_heading() {
    let (mut app, entity) = build_app(OverrideConfig {
        rotation_smoothing: 0.0,
        turn_speed: 90.0,
        ..Default::default()
    });

    hold(&mut app, "Horizontal", 1.0);
    for _ in 0..60 {
        app.update();
    }

    hold(&mut app, "Horizontal", 0.0);
    hold(&mut app, "Vertical", 1.0);
    let start = transform(&app, entity).translation;
    for _ in 0..30 {
        app.update();
    }

    let moved = transform(&app, entity).translation - start;
    assert!(moved.normalize().abs_diff_eq(Vec3::X, 1e-2), "{moved}");
}

#[test]
fn uncontrollable_characters_ignore_input() {
    let (mut app, entity) = build_app(OverrideConfig::default());
    app.world_mut()
        .get_mut::<CharacterMotor>(entity)
        .unwrap()
        .is_controllable = false;
    hold(&mut app, "Vertical", 1.0);

    for _ in 0..10 {
        app.update();
    }

    assert_eq!(transform(&app, entity).translation, Vec3::ZERO);
}

#[test]
fn unbound_axes_never_move_the_character() {
    let (mut app, entity) = build_app(OverrideConfig::default());

    // Blank names fall back to the defaults, so rename the axes away from any input instead
    {
        let mut rotation_override = app.world_mut().get_mut::<OverrideRotation>(entity).unwrap();
        let config = rotation_override.config_mut();
        config.horizontal_axis = "Unbound Horizontal".to_string();
        config.vertical_axis = "Unbound Vertical".to_string();
    }
    hold(&mut app, "Horizontal", 1.0);
    hold(&mut app, "Vertical", 1.0);

    for _ in 0..20 {
        app.update();
    }

    let transform = transform(&app, entity);
    assert_eq!(transform.translation, Vec3::ZERO);
    assert!((transform.rotation * Vec3::Z).abs_diff_eq(Vec3::Z, 1e-6));
}
