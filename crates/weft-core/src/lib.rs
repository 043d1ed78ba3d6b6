#![forbid(unsafe_code)]

//! Core view substrate for weft: screens, views, environments, and the
//! factory registry.
//!
//! A *screen* is plain data describing what should be on display. A
//! [`ViewFactory`] knows how to turn one screen type into a displayable
//! [`View`]. Factories live in an immutable [`ViewRegistry`], which is
//! carried (alongside anything else a render pass needs) in a
//! [`ViewEnvironment`].
//!
//! Higher layers derive new registries from existing ones via
//! [`ViewRegistry::derive_by`] to intercept factory output without touching
//! the originals; see the `weft-compose` crate for the composition-root
//! interop built on that hook.

pub mod environment;
pub mod error;
pub mod registry;
pub mod screen;
pub mod view;

pub use environment::ViewEnvironment;
pub use error::RegistryError;
pub use registry::{ViewFactory, ViewRegistry, screen_factory};
pub use screen::{Screen, ScreenKind, downcast_screen};
pub use view::View;
