//! Angle helpers and the critically-damped "smooth damp" filter
//!
//! All angles in this module are measured in degrees about the +Y axis,
//! where a yaw of 0 faces +Z and a yaw of 90 faces +X.

use bevy::math::{Quat, Vec3};

/// The forward axis of a character in local space
pub const FORWARD: Vec3 = Vec3::Z;

/// Smallest smoothing time accepted by [`smooth_damp`]
pub const MIN_SMOOTH_TIME: f32 = 0.0001;

/// Squared length below which a flattened vector is treated as degenerate
const DEGENERATE_LENGTH_SQUARED: f32 = 1e-8;

/// Wraps `t` into `[0, length)`
///
/// ```rust
/// use facing_override::smoothing::repeat;
///
/// assert_eq!(repeat(370.0, 360.0), 10.0);
/// assert_eq!(repeat(-90.0, 360.0), 270.0);
/// assert_eq!(repeat(360.0, 360.0), 0.0);
/// ```
#[must_use]
#[inline]
pub fn repeat(t: f32, length: f32) -> f32 {
    let wrapped = t - (t / length).floor() * length;
    // Floating point error can land exactly on `length` for tiny negative inputs
    if wrapped >= length {
        0.0
    } else {
        wrapped.max(0.0)
    }
}

/// The shortest signed difference between two angles, in `(-180, 180]`
///
/// ```rust
/// use facing_override::smoothing::delta_angle;
///
/// assert_eq!(delta_angle(350.0, 10.0), 20.0);
/// assert_eq!(delta_angle(10.0, 350.0), -20.0);
/// assert_eq!(delta_angle(0.0, 180.0), 180.0);
/// ```
#[must_use]
#[inline]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let delta = repeat(target - current, 360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Gradually moves `current` toward `target` as a critically damped spring
///
/// `velocity` carries the filter state between calls and must be kept by the caller.
/// `smooth_time` is roughly the time it takes to reach the target and is floored at [`MIN_SMOOTH_TIME`].
/// `max_speed` caps the rate of change; pass [`f32::INFINITY`] for no cap.
///
/// The result never passes the target, and a non-positive `delta_seconds` leaves `current` untouched.
#[must_use]
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    delta_seconds: f32,
) -> f32 {
    if delta_seconds <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let x = omega * delta_seconds;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let original_target = target;
    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);
    let target = current - change;

    let temp = (*velocity + omega * change) * delta_seconds;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Never overshoot
    if (original_target - current > 0.0) == (output > original_target) {
        output = original_target;
        *velocity = (output - original_target) / delta_seconds;
    }

    output
}

/// [`smooth_damp`] for angles in degrees, taking the shortest way around the circle
///
/// The returned angle is continuous with `current` and is not wrapped.
#[must_use]
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    delta_seconds: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(
        current,
        target,
        velocity,
        smooth_time,
        max_speed,
        delta_seconds,
    )
}

/// The horizontal unit vector obtained by rotating [`FORWARD`] by `yaw` degrees about +Y
///
/// ```rust
/// use facing_override::smoothing::forward_from_yaw;
/// use bevy::math::Vec3;
///
/// assert!(forward_from_yaw(0.0).abs_diff_eq(Vec3::Z, 1e-6));
/// assert!(forward_from_yaw(90.0).abs_diff_eq(Vec3::X, 1e-6));
/// ```
#[must_use]
#[inline]
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    let (sin, cos) = yaw.to_radians().sin_cos();
    Vec3::new(sin, 0.0, cos)
}

/// The yaw of `direction` projected onto the horizontal plane, in `[0, 360)`
///
/// Returns `None` for vertical or zero-length directions, which have no meaningful yaw.
#[must_use]
pub fn yaw_from_direction(direction: Vec3) -> Option<f32> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if !flat.is_finite() || flat.length_squared() <= DEGENERATE_LENGTH_SQUARED {
        return None;
    }

    Some(repeat(direction.x.atan2(direction.z).to_degrees(), 360.0))
}

/// The forward vector of `rotation`, flattened onto the horizontal plane and normalized
///
/// Returns `None` when the rotation looks straight up or down.
#[must_use]
pub fn flat_forward(rotation: Quat) -> Option<Vec3> {
    let forward = rotation * FORWARD;
    let flat = Vec3::new(forward.x, 0.0, forward.z);
    if !flat.is_finite() || flat.length_squared() <= DEGENERATE_LENGTH_SQUARED {
        None
    } else {
        Some(flat.normalize())
    }
}
