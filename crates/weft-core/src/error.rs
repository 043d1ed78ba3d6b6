#![forbid(unsafe_code)]

//! Registry error types.
//!
//! All of these indicate configuration or registration bugs: registry
//! contents are fixed for the duration of a render pass, so none of them is
//! worth retrying. They surface to the caller unchanged.

use thiserror::Error;

use crate::screen::ScreenKind;

/// Result alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised by [`ViewRegistry`](crate::ViewRegistry) construction and
/// lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No factory is registered for the requested screen type.
    #[error(
        "no view factory registered to display `{0}` screens; \
         add one to the ViewRegistry before rendering"
    )]
    MissingFactory(ScreenKind),

    /// A registry transform changed which screen type a factory serves.
    #[error(
        "registry transform returned a view factory for `{produced}` \
         when `{requested}` was requested"
    )]
    ContractViolation {
        /// The kind the lookup asked for.
        requested: ScreenKind,
        /// The kind the transformed factory declared.
        produced: ScreenKind,
    },

    /// Two factories for the same screen type were registered together.
    #[error("a view factory for `{0}` screens is already registered")]
    DuplicateFactory(ScreenKind),
}
