#![forbid(unsafe_code)]

//! Composition interop for weft.
//!
//! Bridges the factory-keyed [`ViewRegistry`](weft_core::ViewRegistry) world
//! with composition-style rendering, where a screen's content runs inside a
//! [`Composer`] threaded down the render call chain:
//!
//! - [`Composer`] and [`ScopedLocal`]: dynamically-scoped values with
//!   stack-discipline binding, the propagation substrate.
//! - [`compose_screen`] / [`ComposeFactory`]: factories whose content runs
//!   in a composition, resolvable through an ordinary registry.
//! - [`show_screen`]: resolve and display a child screen inside the current
//!   composition.
//! - [`CompositionRoot`] and [`WithCompositionRoot`]: wrap every
//!   compose-capable factory so that caller-supplied setup (theming and the
//!   like) is applied exactly once per composition, however deeply compose
//!   factories end up nested.

pub mod composer;
pub mod factory;
pub mod root;
pub mod show;

pub use composer::{Composer, ScopedLocal};
pub use factory::{ComposeFactory, compose_screen};
pub use root::{CompositionRoot, Content, WithCompositionRoot, composition_root};
pub use show::show_screen;
