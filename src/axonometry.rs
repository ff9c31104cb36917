//! Remapping of world-space facing directions for a camera or view convention
//!
//! An [`Axonometry`] takes the direction a character would like to face and reinterprets it
//! for the projection the game uses: an isometric game may only allow a fixed number of headings,
//! while a side-scroller only lets characters look left or right.
//!
//! Need something specific? Implement [`CustomAxonometry`] and wrap it with [`Axonometry::Custom`].

use std::fmt::Debug;

use bevy::math::Vec3;
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};

use crate::smoothing::{forward_from_yaw, repeat, yaw_from_direction};

/// How facing directions are reinterpreted before being handed back to the host
///
/// ```rust
/// use bevy::math::Vec3;
/// use facing_override::axonometry::Axonometry;
///
/// let direction = Vec3::new(0.3, 0.0, 1.0).normalize();
///
/// // No remapping at all
/// assert_eq!(Axonometry::None.process_direction(direction), direction);
///
/// // Only the four cardinal headings are allowed
/// let snapped = Axonometry::Isometric { directions: 4 }.process_direction(direction);
/// assert!(snapped.abs_diff_eq(Vec3::Z, 1e-5));
///
/// // Side-scrollers look left or right
/// let side = Axonometry::SideScroll.process_direction(direction);
/// assert!(side.abs_diff_eq(Vec3::X, 1e-5));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum Axonometry {
    /// Directions are used unchanged.
    #[default]
    None,

    /// Snaps the heading to the nearest of `directions` evenly spaced headings,
    /// starting from +Z.
    Isometric {
        /// How many headings the character may face, treated as at least one.
        directions: u8,
    },

    /// Collapses the heading onto the ±X axis.
    ///
    /// Directions without a horizontal X component are left as they are.
    SideScroll,

    /// A user-defined remapping.
    ///
    /// This variant is skipped when (de)serializing.
    #[serde(skip)]
    Custom(Box<dyn CustomAxonometry>),
}

impl Axonometry {
    /// The classic eight-way isometric setup
    pub const ISOMETRIC_8: Axonometry = Axonometry::Isometric { directions: 8 };

    /// Reinterprets a world-space facing `direction`, preserving its length
    #[must_use]
    pub fn process_direction(&self, direction: Vec3) -> Vec3 {
        match self {
            Self::None => direction,
            Self::Isometric { directions } => {
                let Some(yaw) = yaw_from_direction(direction) else {
                    return direction;
                };

                let step = 360.0 / f32::from((*directions).max(1));
                let snapped = repeat((yaw / step).round() * step, 360.0);
                forward_from_yaw(snapped) * direction.length()
            }
            Self::SideScroll => {
                if direction.x.abs() <= f32::EPSILON {
                    direction
                } else {
                    Vec3::X * direction.x.signum() * direction.length()
                }
            }
            Self::Custom(axonometry) => axonometry.process_direction(direction),
        }
    }
}

impl<A: CustomAxonometry + 'static> From<A> for Axonometry {
    fn from(value: A) -> Self {
        Self::Custom(Box::new(value))
    }
}

/// A user-defined [`Axonometry`]
///
/// Implementors must be cheap to clone: the configured axonometry is cloned
/// every time it is handed to a facing strategy.
///
/// ```rust
/// use bevy::math::Vec3;
/// use facing_override::axonometry::{Axonometry, CustomAxonometry};
///
/// /// Mirrors every heading across the Z axis
/// #[derive(Debug, Clone)]
/// struct Mirrored;
///
/// impl CustomAxonometry for Mirrored {
///     fn process_direction(&self, direction: Vec3) -> Vec3 {
///         Vec3::new(-direction.x, direction.y, direction.z)
///     }
/// }
///
/// let axonometry = Axonometry::from(Mirrored);
/// assert_eq!(axonometry.process_direction(Vec3::X), -Vec3::X);
/// ```
pub trait CustomAxonometry: Send + Sync + Debug + DynClone {
    /// Remaps a world-space facing direction
    fn process_direction(&self, direction: Vec3) -> Vec3;
}

dyn_clone::clone_trait_object!(CustomAxonometry);
