//! Errors that may occur when installing an override

use derive_more::{Display, Error};

/// A collaborator needed to activate a [`FacingOverride`](crate::coordinator::FacingOverride) was missing
///
/// This error is never fatal: the override simply stays inactive,
/// and the next activation attempt will try again.
#[derive(Debug, Clone, Copy, Error, Display, PartialEq, Eq)]
pub enum OverrideError {
    /// There is no character to drive
    #[display(fmt = "no character is available to override")]
    MissingCharacter,
    /// The character has no strategy kernel to install into
    #[display(fmt = "the character has no strategy kernel")]
    MissingKernel,
}
