#![forbid(unsafe_code)]

//! The composition context and dynamically-scoped locals.
//!
//! A [`Composer`] is an explicit context threaded through every content
//! function in a composition, one per independently-rooted traversal. It
//! carries [`ScopedLocal`] bindings with stack discipline: a binding is
//! visible to everything invoked inside [`ScopedLocal::provide`] and gone
//! the moment it returns. Sibling subtrees therefore never observe each
//! other's bindings, and there is no global mutable state to reset.
//!
//! # Example
//!
//! ```
//! use std::sync::LazyLock;
//! use weft_compose::{Composer, ScopedLocal};
//!
//! static DEPTH: LazyLock<ScopedLocal<u32>> = LazyLock::new(|| ScopedLocal::new(|| 0));
//!
//! let mut composer = Composer::root();
//! assert_eq!(DEPTH.get(&composer), 0);
//! let seen = DEPTH.provide(&mut composer, 7, |c| DEPTH.get(c));
//! assert_eq!(seen, 7);
//! assert_eq!(DEPTH.get(&composer), 0);
//! ```

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

// ─── Local key generation ────────────────────────────────────────────────────

static NEXT_LOCAL_ID: AtomicU64 = AtomicU64::new(1);

fn next_local_id() -> u64 {
    NEXT_LOCAL_ID.fetch_add(1, Ordering::Relaxed)
}

// ─── ScopedLocal ─────────────────────────────────────────────────────────────

/// A dynamically-scoped value keyed into a [`Composer`].
///
/// Reads fall back to the default until some enclosing
/// [`provide`](Self::provide) call binds a value; nested `provide` calls
/// shadow outer ones for their dynamic extent only.
pub struct ScopedLocal<T> {
    id: u64,
    default: fn() -> T,
}

impl<T: Clone + 'static> ScopedLocal<T> {
    /// Create a local with a default value.
    ///
    /// Typically stored in a `static` behind `LazyLock` so every traversal
    /// reads the same key.
    #[must_use]
    pub fn new(default: fn() -> T) -> Self {
        Self {
            id: next_local_id(),
            default,
        }
    }

    /// The innermost bound value on `composer`'s current path, or the
    /// default if no enclosing `provide` bound one.
    #[must_use]
    pub fn get(&self, composer: &Composer) -> T {
        composer
            .bindings
            .iter()
            .rev()
            .find(|(id, _)| *id == self.id)
            .and_then(|(_, value)| value.downcast_ref::<T>())
            .cloned()
            .unwrap_or_else(self.default)
    }

    /// Bind `value` for the dynamic extent of `body`.
    ///
    /// The binding is pushed before `body` runs and popped right after, so
    /// it is visible to everything `body` invokes and to nothing else.
    pub fn provide<R>(
        &self,
        composer: &mut Composer,
        value: T,
        body: impl FnOnce(&mut Composer) -> R,
    ) -> R {
        composer.bindings.push((self.id, Box::new(value)));
        let out = body(composer);
        composer.bindings.pop();
        out
    }
}

impl<T> fmt::Debug for ScopedLocal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedLocal").field("id", &self.id).finish()
    }
}

// ─── Composer ────────────────────────────────────────────────────────────────

/// Context for one composition traversal.
///
/// Owns the scoped-local binding stack. Create one per independently-rooted
/// traversal; content functions receive it by `&mut` and must not stash it.
#[derive(Default)]
pub struct Composer {
    bindings: Vec<(u64, Box<dyn Any>)>,
}

impl Composer {
    /// Start a fresh composition root with no bindings.
    #[must_use]
    pub fn root() -> Self {
        trace!("composition root started");
        Self::default()
    }

    /// Number of live scoped-local bindings (diagnostics).
    #[must_use]
    pub fn binding_depth(&self) -> usize {
        self.bindings.len()
    }
}

impl fmt::Debug for Composer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer")
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;

    static FLAG: LazyLock<ScopedLocal<bool>> = LazyLock::new(|| ScopedLocal::new(|| false));
    static LABEL: LazyLock<ScopedLocal<&'static str>> =
        LazyLock::new(|| ScopedLocal::new(|| "default"));

    #[test]
    fn unbound_local_reads_default() {
        let composer = Composer::root();
        assert!(!FLAG.get(&composer));
        assert_eq!(LABEL.get(&composer), "default");
    }

    #[test]
    fn provide_binds_for_dynamic_extent_only() {
        let mut composer = Composer::root();
        let inside = FLAG.provide(&mut composer, true, |c| FLAG.get(c));
        assert!(inside);
        assert!(!FLAG.get(&composer));
        assert_eq!(composer.binding_depth(), 0);
    }

    #[test]
    fn nested_provide_shadows_and_restores() {
        let mut composer = Composer::root();
        let (inner, outer_after) = LABEL.provide(&mut composer, "outer", |c| {
            let inner = LABEL.provide(c, "inner", |c| LABEL.get(c));
            (inner, LABEL.get(c))
        });
        assert_eq!(inner, "inner");
        assert_eq!(outer_after, "outer");
    }

    #[test]
    fn distinct_locals_do_not_collide() {
        let mut composer = Composer::root();
        FLAG.provide(&mut composer, true, |c| {
            assert_eq!(LABEL.get(c), "default");
            assert!(FLAG.get(c));
        });
    }

    #[test]
    fn sequential_scopes_are_isolated() {
        let mut composer = Composer::root();
        FLAG.provide(&mut composer, true, |_| {});
        // A later subtree on the same composer starts from the default.
        assert!(!FLAG.get(&composer));
        let second = FLAG.provide(&mut composer, true, |c| FLAG.get(c));
        assert!(second);
    }

    #[test]
    fn independent_composers_are_isolated() {
        let mut first = Composer::root();
        FLAG.provide(&mut first, true, |_c| {
            let second = Composer::root();
            assert!(!FLAG.get(&second));
        });
    }
}
