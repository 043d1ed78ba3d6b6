#![forbid(unsafe_code)]

//! Typed, immutable environment threaded through a render pass.
//!
//! `ViewEnvironment` is a value-like map keyed by type: at most one entry
//! per Rust type, derivation produces a new environment and never mutates
//! the source. The registry rides in the environment as an ordinary entry
//! with an empty-registry default, so layers that rewrite the registry
//! (e.g. the composition-root interop) just derive a new environment.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use ahash::HashMap;

use crate::registry::ViewRegistry;

/// Immutable typed map carried through a render pass.
///
/// Cheap to clone; entries are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct ViewEnvironment {
    values: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl ViewEnvironment {
    /// An empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive an environment with `value` inserted, replacing any existing
    /// entry of the same type.
    #[must_use]
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Self {
        let mut values = self.values.clone();
        values.insert(TypeId::of::<T>(), Arc::new(value));
        Self { values }
    }

    /// Read the entry of type `T`, if present.
    #[must_use]
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// The registry carried by this environment (empty if none was set).
    #[must_use]
    pub fn registry(&self) -> ViewRegistry {
        self.get::<ViewRegistry>().cloned().unwrap_or_default()
    }

    /// Derive an environment carrying `registry`.
    #[must_use]
    pub fn with_registry(&self, registry: ViewRegistry) -> Self {
        self.with_value(registry)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the environment has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for ViewEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewEnvironment")
            .field("entries", &self.values.len())
            .finish()
    }
}
