//! The collaborators a strategy talks to while it runs
//!
//! These traits describe what a character framework must expose for the strategies in this crate to work.
//! The [`bevy_host`](crate::bevy_host) module implements them on top of Bevy components and resources.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bevy::math::Vec3;
use bevy::transform::components::Transform;

/// The slot of a kernel a strategy fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Decides which way the character faces
    Facing,
    /// Turns player input into motion
    Player,
}

/// The frame of reference of a motion command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Space {
    /// Directions are expressed in world coordinates
    #[default]
    World,
    /// Directions are relative to the character's own rotation
    Local,
}

/// A source of named, unfiltered input axes
pub trait AxisSource {
    /// The raw value of the axis called `name`, roughly within `[-1, 1]`
    ///
    /// Unknown axes read as zero.
    fn axis_raw(&self, name: &str) -> f32;
}

/// The character a strategy drives
pub trait CharacterBody {
    /// The character's current transform, if it has one
    fn transform(&self) -> Option<Transform>;

    /// Is this the character the local player controls?
    fn is_player(&self) -> bool;

    /// Is player control currently allowed?
    fn is_controllable(&self) -> bool;

    /// The character's linear movement speed, in units per second
    fn linear_speed(&self) -> f32;

    /// Asks the motion system to move with `velocity`
    ///
    /// `priority` decides how the command blends with others; zero applies it immediately.
    fn move_to_direction(&mut self, velocity: Vec3, space: Space, priority: i32);
}

/// Everything a strategy may read or command during one tick
pub struct TickContext<'a> {
    /// Time elapsed since the previous tick, in seconds
    pub delta_seconds: f32,
    /// Where input axes are read from
    pub input: &'a dyn AxisSource,
    /// The character being driven, when there is one
    pub character: Option<&'a mut dyn CharacterBody>,
}

impl<'a> TickContext<'a> {
    /// Creates a context for a tick lasting `delta_seconds`
    pub fn new(
        delta_seconds: f32,
        input: &'a dyn AxisSource,
        character: Option<&'a mut dyn CharacterBody>,
    ) -> Self {
        Self {
            delta_seconds,
            input,
            character,
        }
    }

    /// Reads an axis, treating an empty name as an unbound axis
    #[must_use]
    pub fn axis_raw(&self, name: &str) -> f32 {
        if name.is_empty() {
            0.0
        } else {
            self.input.axis_raw(name)
        }
    }
}

/// A swappable strategy deciding which way a character faces
pub trait FacingUnit: Send {
    /// Advances the strategy by one tick and returns the world-space direction to face
    fn direction(&mut self, tick: &mut TickContext) -> Vec3;

    /// Clears any accumulated state, syncing with `character` when available
    fn reset(&mut self, _character: Option<&dyn CharacterBody>) {}
}

/// A swappable strategy turning player input into motion
pub trait PlayerUnit: Send {
    /// Advances the strategy by one tick, issuing motion commands to the character
    fn update(&mut self, tick: &mut TickContext);

    /// Clears any accumulated state, stopping `character` when available
    fn reset(&mut self, _character: Option<&mut dyn CharacterBody>) {}
}

/// A facing strategy shared between its owner and a kernel
pub type SharedFacing = Arc<Mutex<dyn FacingUnit>>;

/// A player strategy shared between its owner and a kernel
pub type SharedPlayer = Arc<Mutex<dyn PlayerUnit>>;

/// Locks a strategy, recovering it if a previous holder panicked
pub fn lock_unit<T: ?Sized>(unit: &Mutex<T>) -> MutexGuard<'_, T> {
    unit.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Do `a` and `b` point to the same strategy?
///
/// Only the allocation is compared, so typed and type-erased handles can be mixed.
#[must_use]
#[inline]
pub fn same_unit<T: ?Sized, U: ?Sized>(a: &Arc<T>, b: &Arc<U>) -> bool {
    Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}
