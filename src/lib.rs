#![forbid(missing_docs)]
#![forbid(unsafe_code)]
#![warn(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod axonometry;
pub mod bevy_host;
pub mod config;
pub mod coordinator;
pub mod errors;
pub mod facing;
pub mod host;
pub mod kernel;
pub mod locomotion;
pub mod plugin;
pub mod smoothing;
pub mod systems;

/// Everything you need to get started
pub mod prelude {
    pub use crate::axonometry::{Axonometry, CustomAxonometry};
    pub use crate::bevy_host::{CharacterMotor, InputAxes, MotionCommand, OverrideRotation};
    pub use crate::config::OverrideConfig;
    pub use crate::coordinator::FacingOverride;
    pub use crate::errors::OverrideError;
    pub use crate::facing::AxisFacing;
    pub use crate::host::{
        AxisSource, CharacterBody, FacingUnit, PlayerUnit, SharedFacing, SharedPlayer, Space,
        TickContext,
    };
    pub use crate::kernel::{Kernel, StrategyKernel};
    pub use crate::locomotion::AxisLocomotion;

    pub use crate::plugin::{FacingOverridePlugin, FacingOverrideSystem};
}
