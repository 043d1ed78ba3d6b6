#![forbid(unsafe_code)]

//! Weft public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users.

pub mod prelude {
    pub use weft_compose as compose;
    pub use weft_core as core;

    pub use weft_compose::{
        ComposeFactory, Composer, CompositionRoot, Content, ScopedLocal, WithCompositionRoot,
        compose_screen, composition_root, show_screen,
    };
    pub use weft_core::{
        RegistryError, Screen, ScreenKind, View, ViewEnvironment, ViewFactory, ViewRegistry,
        screen_factory,
    };
}
