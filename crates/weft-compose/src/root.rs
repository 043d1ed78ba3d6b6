#![forbid(unsafe_code)]

//! The composition root: caller-supplied setup applied exactly once per
//! composition.
//!
//! A [`CompositionRoot`] wraps the content of the *outermost*
//! compose-capable factory in a composition. Scoped locals bound by the
//! root propagate down to every nested compose factory, so this is the
//! place to install theming and other shared setup. Nested compose
//! factories resolved through the same registry do not re-apply it: a
//! private scoped flag records, per traversal path, that the root already
//! ran.
//!
//! # Example
//!
//! ```
//! use weft_compose::{Composer, WithCompositionRoot, composition_root, compose_screen, show_screen};
//! use weft_core::{View, ViewEnvironment, ViewRegistry};
//!
//! #[derive(Debug)]
//! struct Hello;
//!
//! # fn main() -> Result<(), weft_core::RegistryError> {
//! let registry = ViewRegistry::new([compose_screen(
//!     |_: &Hello, _: &ViewEnvironment, _: &mut Composer| View::text("hello"),
//! )])?;
//! let root = composition_root(|composer, content| {
//!     View::stack([View::text(">> "), content.compose(composer)])
//! });
//! let env = ViewEnvironment::new()
//!     .with_registry(registry)
//!     .with_composition_root(root);
//!
//! let view = show_screen(&mut Composer::root(), &Hello, &env)?;
//! assert_eq!(view.flat_text(), ">> hello");
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use tracing::{debug, trace};
use weft_core::{Screen, View, ViewEnvironment, ViewFactory, ViewRegistry};

use crate::composer::{Composer, ScopedLocal};
use crate::factory::ComposeFactory;

/// The remaining content handed to a [`CompositionRoot`].
///
/// The root decides where its content appears in the output by calling
/// [`compose`](Self::compose) with the current composer; scoped locals it
/// binds around that call are visible to everything the content shows.
pub struct Content<'a> {
    body: &'a mut dyn FnMut(&mut Composer) -> View,
}

impl<'a> Content<'a> {
    pub(crate) fn new(body: &'a mut dyn FnMut(&mut Composer) -> View) -> Self {
        Self { body }
    }

    /// Compose the remaining content under `composer`.
    pub fn compose(mut self, composer: &mut Composer) -> View {
        (self.body)(composer)
    }
}

impl fmt::Debug for Content<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Content").finish_non_exhaustive()
    }
}

/// Setup applied around the outermost compose-capable factory in a
/// composition.
///
/// Receives the composer and the remaining content; returns the view to
/// display.
pub type CompositionRoot = Arc<dyn for<'a> Fn(&mut Composer, Content<'a>) -> View + Send + Sync>;

/// Build a [`CompositionRoot`] from a closure.
pub fn composition_root<F>(wrap: F) -> CompositionRoot
where
    F: for<'a> Fn(&mut Composer, Content<'a>) -> View + Send + Sync + 'static,
{
    Arc::new(wrap)
}

/// Per-path record that a composition root already ran. The only way this
/// reads `true` is that an enclosing [`wrapped_with_root_if_necessary`]
/// call bound it while applying the root.
static ROOT_APPLIED: LazyLock<ScopedLocal<bool>> = LazyLock::new(|| ScopedLocal::new(|| false));

/// Apply `root` around `content` unless an enclosing call on this
/// traversal path already did.
///
/// This cannot fail on its own; it only branches on the scoped flag and
/// invokes caller code.
pub(crate) fn wrapped_with_root_if_necessary(
    root: &CompositionRoot,
    composer: &mut Composer,
    content: Content<'_>,
) -> View {
    if ROOT_APPLIED.get(composer) {
        // Already applied above this point; compose the content directly.
        trace!("composition root already applied on this path");
        content.compose(composer)
    } else {
        // First compose factory on this path: flag everything below so
        // nested factories hit the branch above, then run the root.
        debug!("applying composition root");
        ROOT_APPLIED.provide(composer, true, |c| root(c, content))
    }
}

/// Attach a [`CompositionRoot`] to a registry or environment.
pub trait WithCompositionRoot {
    /// Derive a value whose compose-capable factories are wrapped so that
    /// `root` is applied exactly once per composition.
    #[must_use]
    fn with_composition_root(&self, root: CompositionRoot) -> Self;
}

impl WithCompositionRoot for ViewRegistry {
    fn with_composition_root(&self, root: CompositionRoot) -> Self {
        self.derive_by(move |factory| {
            let compose = factory.as_any().downcast_ref::<ComposeFactory>().cloned();
            let Some(inner) = compose else {
                // Not compose-capable: identity transform.
                return factory;
            };
            let kind = inner.kind();
            let root = root.clone();
            Arc::new(ComposeFactory::from_parts(
                kind,
                Arc::new(
                    move |screen: &dyn Screen, env: &ViewEnvironment, composer: &mut Composer| {
                        let mut body = |c: &mut Composer| inner.content(screen, env, c);
                        wrapped_with_root_if_necessary(&root, composer, Content::new(&mut body))
                    },
                ),
            ))
        })
    }
}

impl WithCompositionRoot for ViewEnvironment {
    fn with_composition_root(&self, root: CompositionRoot) -> Self {
        self.with_registry(self.registry().with_composition_root(root))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
