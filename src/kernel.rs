//! Containers of swappable strategies

use bevy::ecs::prelude::Component;
use bevy::log::debug;

use crate::host::{same_unit, Capability, SharedFacing, SharedPlayer};

/// The strategy slots of a single character
///
/// A kernel does not own the strategies installed into it:
/// whoever installs a strategy is expected to keep it alive and to put the previous one back.
pub trait StrategyKernel {
    /// The facing strategy currently in use
    fn facing(&self) -> Option<SharedFacing>;

    /// The player strategy currently in use
    fn player(&self) -> Option<SharedPlayer>;

    /// Replaces the facing strategy
    fn change_facing(&mut self, unit: SharedFacing);

    /// Replaces the player strategy
    fn change_player(&mut self, unit: SharedPlayer);
}

/// A [`StrategyKernel`] stored as a component on a character entity
///
/// The strategies a kernel is created with are its "home" strategies and stay alive as long as the kernel does,
/// so they can always be restored after being swapped out.
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use bevy::math::Vec3;
/// use facing_override::host::{FacingUnit, SharedFacing, TickContext};
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
/// let home: SharedFacing = Arc::new(Mutex::new(Still));
/// let mut kernel = Kernel::default().with_facing(home.clone());
/// assert!(Arc::ptr_eq(&kernel.facing().unwrap(), &home));
///
/// kernel.change_facing(Arc::new(Mutex::new(Still)));
/// assert!(!Arc::ptr_eq(&kernel.facing().unwrap(), &home));
/// assert_eq!(kernel.revision(), 1);
/// ```
#[derive(Component, Default)]
pub struct Kernel {
    facing: Option<SharedFacing>,
    player: Option<SharedPlayer>,
    home_facing: Option<SharedFacing>,
    home_player: Option<SharedPlayer>,
    revision: u64,
}

impl Kernel {
    /// Creates a kernel whose home strategies are `facing` and `player`
    #[must_use]
    pub fn new(facing: SharedFacing, player: SharedPlayer) -> Self {
        Self::default().with_facing(facing).with_player(player)
    }

    /// Sets the home facing strategy, installing it as the current one
    #[must_use]
    pub fn with_facing(mut self, facing: SharedFacing) -> Self {
        self.home_facing = Some(facing.clone());
        self.facing = Some(facing);
        self
    }

    /// Sets the home player strategy, installing it as the current one
    #[must_use]
    pub fn with_player(mut self, player: SharedPlayer) -> Self {
        self.home_player = Some(player.clone());
        self.player = Some(player);
        self
    }

    /// How many times a strategy has been swapped in
    ///
    /// Installing the strategy that is already current still counts as a swap.
    #[must_use]
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Is the strategy in `capability`'s slot one of this kernel's home strategies?
    #[must_use]
    pub fn is_home(&self, capability: Capability) -> bool {
        match capability {
            Capability::Facing => matches!(
                (&self.facing, &self.home_facing),
                (Some(current), Some(home)) if same_unit(current, home)
            ),
            Capability::Player => matches!(
                (&self.player, &self.home_player),
                (Some(current), Some(home)) if same_unit(current, home)
            ),
        }
    }

    fn bump(&mut self, capability: Capability) {
        self.revision += 1;
        debug!(
            "{capability:?} strategy swapped (kernel revision {})",
            self.revision
        );
    }
}

impl StrategyKernel for Kernel {
    fn facing(&self) -> Option<SharedFacing> {
        self.facing.clone()
    }

    fn player(&self) -> Option<SharedPlayer> {
        self.player.clone()
    }

    fn change_facing(&mut self, unit: SharedFacing) {
        self.facing = Some(unit);
        self.bump(Capability::Facing);
    }

    fn change_player(&mut self, unit: SharedPlayer) {
        self.player = Some(unit);
        self.bump(Capability::Player);
    }
}
