#![forbid(unsafe_code)]

//! Compose-capable view factories.
//!
//! A [`ComposeFactory`] is an ordinary [`ViewFactory`] whose content runs
//! inside a [`Composer`]. Looked up as a plain factory it starts a fresh
//! composition root; resolved from within a running composition (see
//! [`show_screen`](crate::show_screen)) its content joins the caller's
//! composer, which is what lets scoped locals propagate from parent content
//! to child content.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use weft_core::{Screen, ScreenKind, View, ViewEnvironment, ViewFactory, downcast_screen};

use crate::composer::Composer;

pub(crate) type ContentFn =
    dyn Fn(&dyn Screen, &ViewEnvironment, &mut Composer) -> View + Send + Sync;

/// A view factory whose content runs inside a composition.
#[derive(Clone)]
pub struct ComposeFactory {
    kind: ScreenKind,
    body: Arc<ContentFn>,
}

impl ComposeFactory {
    pub(crate) fn from_parts(kind: ScreenKind, body: Arc<ContentFn>) -> Self {
        Self { kind, body }
    }

    /// Run this factory's content inside an existing composition.
    pub fn content(
        &self,
        screen: &dyn Screen,
        env: &ViewEnvironment,
        composer: &mut Composer,
    ) -> View {
        (self.body)(screen, env, composer)
    }
}

impl ViewFactory for ComposeFactory {
    fn kind(&self) -> ScreenKind {
        self.kind
    }

    fn build(&self, screen: &dyn Screen, env: &ViewEnvironment) -> View {
        // A plain build is an independently-rooted traversal.
        let mut composer = Composer::root();
        self.content(screen, env, &mut composer)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for ComposeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposeFactory")
            .field("kind", &self.kind)
            .finish()
    }
}

/// Build a compose-capable factory for screen type `T` from a content
/// function.
pub fn compose_screen<T, F>(content: F) -> Arc<dyn ViewFactory>
where
    T: Screen,
    F: Fn(&T, &ViewEnvironment, &mut Composer) -> View + Send + Sync + 'static,
{
    let kind = ScreenKind::of::<T>();
    Arc::new(ComposeFactory::from_parts(
        kind,
        Arc::new(move |screen, env, composer| {
            let Some(screen) = downcast_screen::<T>(screen) else {
                panic!("compose factory for `{kind}` was handed a screen of a different type");
            };
            content(screen, env, composer)
        }),
    ))
}
