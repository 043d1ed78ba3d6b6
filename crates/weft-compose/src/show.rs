#![forbid(unsafe_code)]

//! Child screen resolution inside a composition.

use tracing::trace;
use weft_core::error::Result;
use weft_core::{Screen, ScreenKind, View, ViewEnvironment};

use crate::composer::Composer;
use crate::factory::ComposeFactory;

/// Resolve `screen`'s factory through `env`'s registry and display it.
///
/// Compose-capable factories run their content in the caller's `composer`,
/// so scoped locals bound above this call stay visible below it. Anything
/// else is built as a plain view.
///
/// # Errors
///
/// Whatever the registry lookup raises: a missing registration for
/// `screen`'s type, or a contract violation from a derived registry's
/// transform.
pub fn show_screen<T: Screen>(
    composer: &mut Composer,
    screen: &T,
    env: &ViewEnvironment,
) -> Result<View> {
    let kind = ScreenKind::of::<T>();
    let factory = env.registry().factory_for(kind)?;
    match factory.as_any().downcast_ref::<ComposeFactory>() {
        Some(compose) => {
            trace!(screen = %kind, "showing screen in current composition");
            Ok(compose.content(screen, env, composer))
        }
        None => {
            trace!(screen = %kind, "showing screen via plain factory");
            Ok(factory.build(screen, env))
        }
    }
}
