#![forbid(unsafe_code)]

//! The view factory registry.
//!
//! A [`ViewRegistry`] maps each [`ScreenKind`] to the one factory allowed to
//! display screens of that kind. Registries are immutable: combination
//! ([`ViewRegistry::merge`]) and interception ([`ViewRegistry::derive_by`])
//! both produce new registries and leave the source untouched.
//!
//! Derivation is lazy. A derived registry remembers its base and a
//! per-factory transform; the transform runs at lookup time, and its result
//! is validated to still serve the requested kind. A transform that changes
//! which screen type a factory serves is a bug in the transform, reported as
//! [`RegistryError::ContractViolation`].

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use ahash::HashMap;
use tracing::{debug, trace};

use crate::environment::ViewEnvironment;
use crate::error::{RegistryError, Result};
use crate::screen::{Screen, ScreenKind, downcast_screen};
use crate::view::View;

// ─── ViewFactory ─────────────────────────────────────────────────────────────

/// Produces a [`View`] for screens of one declared kind.
pub trait ViewFactory: Send + Sync {
    /// The screen type this factory can display.
    fn kind(&self) -> ScreenKind;

    /// Produce a view for `screen` under `env`.
    ///
    /// The registry only hands a factory screens of its declared kind, so
    /// implementations may downcast without a fallback path.
    fn build(&self, screen: &dyn Screen, env: &ViewEnvironment) -> View;

    /// Capability probe, for layers that recognize and wrap specific
    /// factory flavors while passing everything else through.
    fn as_any(&self) -> &dyn Any;
}

impl fmt::Debug for dyn ViewFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ViewFactory").field(&self.kind()).finish()
    }
}

/// Build a factory for screen type `T` from a plain build function.
pub fn screen_factory<T, F>(build: F) -> Arc<dyn ViewFactory>
where
    T: Screen,
    F: Fn(&T, &ViewEnvironment) -> View + Send + Sync + 'static,
{
    Arc::new(TypedFactory {
        build,
        _marker: PhantomData,
    })
}

struct TypedFactory<T, F> {
    build: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> ViewFactory for TypedFactory<T, F>
where
    T: Screen,
    F: Fn(&T, &ViewEnvironment) -> View + Send + Sync + 'static,
{
    fn kind(&self) -> ScreenKind {
        ScreenKind::of::<T>()
    }

    fn build(&self, screen: &dyn Screen, env: &ViewEnvironment) -> View {
        let Some(screen) = downcast_screen::<T>(screen) else {
            panic!(
                "view factory for `{}` was handed a screen of a different type",
                ScreenKind::of::<T>()
            );
        };
        (self.build)(screen, env)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ─── ViewRegistry ────────────────────────────────────────────────────────────

type TransformFn = dyn Fn(Arc<dyn ViewFactory>) -> Arc<dyn ViewFactory> + Send + Sync;

enum Inner {
    /// A concrete factory map.
    Concrete(HashMap<ScreenKind, Arc<dyn ViewFactory>>),
    /// A lazy view over `base` with `transform` applied at lookup time.
    Derived {
        base: ViewRegistry,
        transform: Arc<TransformFn>,
    },
}

/// Immutable mapping from screen kind to view factory.
///
/// Cheap to clone (`Arc` inside); lookup on a derived registry walks down
/// to the concrete base, then applies each layer's transform on the way
/// back up.
#[derive(Clone)]
pub struct ViewRegistry {
    inner: Arc<Inner>,
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl ViewRegistry {
    /// A registry with no factories.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(Inner::Concrete(HashMap::default())),
        }
    }

    /// Build a registry from `factories`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateFactory`] if two factories declare the same
    /// screen kind.
    pub fn new(factories: impl IntoIterator<Item = Arc<dyn ViewFactory>>) -> Result<Self> {
        let mut map = HashMap::default();
        for factory in factories {
            let kind = factory.kind();
            if map.insert(kind, factory).is_some() {
                return Err(RegistryError::DuplicateFactory(kind));
            }
        }
        debug!(keys = map.len(), "view registry built");
        Ok(Self {
            inner: Arc::new(Inner::Concrete(map)),
        })
    }

    /// All registered screen kinds.
    #[must_use]
    pub fn keys(&self) -> Vec<ScreenKind> {
        match &*self.inner {
            Inner::Concrete(map) => map.keys().copied().collect(),
            Inner::Derived { base, .. } => base.keys(),
        }
    }

    /// Number of registered screen kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        match &*self.inner {
            Inner::Concrete(map) => map.len(),
            Inner::Derived { base, .. } => base.len(),
        }
    }

    /// Whether no factories are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up the factory for `kind`.
    ///
    /// On a derived registry this applies the transform chain and validates
    /// that the result still serves `kind`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::MissingFactory`] if nothing is registered for
    /// `kind`; [`RegistryError::ContractViolation`] if a transform changed
    /// the factory's declared kind.
    pub fn factory_for(&self, kind: ScreenKind) -> Result<Arc<dyn ViewFactory>> {
        match &*self.inner {
            Inner::Concrete(map) => {
                trace!(screen = %kind, "registry lookup");
                map.get(&kind)
                    .cloned()
                    .ok_or(RegistryError::MissingFactory(kind))
            }
            Inner::Derived { base, transform } => {
                trace!(screen = %kind, "derived registry lookup");
                let factory = base.factory_for(kind)?;
                let transformed = transform(factory);
                if transformed.kind() != kind {
                    return Err(RegistryError::ContractViolation {
                        requested: kind,
                        produced: transformed.kind(),
                    });
                }
                Ok(transformed)
            }
        }
    }

    /// Derive a registry with `transform` applied to every factory at
    /// lookup time.
    ///
    /// The key set is unchanged; transforms must return a factory for the
    /// same kind they were given.
    #[must_use]
    pub fn derive_by(
        &self,
        transform: impl Fn(Arc<dyn ViewFactory>) -> Arc<dyn ViewFactory> + Send + Sync + 'static,
    ) -> Self {
        debug!(keys = self.len(), "registry derived");
        Self {
            inner: Arc::new(Inner::Derived {
                base: self.clone(),
                transform: Arc::new(transform),
            }),
        }
    }

    /// Combine two registries into one concrete registry.
    ///
    /// Pending transforms on either side are forced (and validated) here.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateFactory`] if both registries serve the same
    /// screen kind, plus anything [`Self::factory_for`] can raise while
    /// forcing derived entries.
    pub fn merge(&self, other: &Self) -> Result<Self> {
        let mut map = HashMap::default();
        for registry in [self, other] {
            for kind in registry.keys() {
                let factory = registry.factory_for(kind)?;
                if map.insert(kind, factory).is_some() {
                    return Err(RegistryError::DuplicateFactory(kind));
                }
            }
        }
        debug!(keys = map.len(), "view registries merged");
        Ok(Self {
            inner: Arc::new(Inner::Concrete(map)),
        })
    }
}

impl fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let derived = matches!(&*self.inner, Inner::Derived { .. });
        f.debug_struct("ViewRegistry")
            .field("keys", &self.len())
            .field("derived", &derived)
            .finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
