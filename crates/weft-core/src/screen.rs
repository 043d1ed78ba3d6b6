#![forbid(unsafe_code)]

//! Screens and their type identifiers.
//!
//! Any plain data type can act as a screen; there is nothing to implement.
//! Registries key factories by [`ScreenKind`], which pairs the screen's
//! `TypeId` with a developer-readable type name so that registration
//! mistakes surface with a name instead of an opaque id.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Marker for rendering data ("screens").
///
/// Blanket-implemented for every eligible type: a screen is just data, and
/// the registry decides how it gets displayed.
pub trait Screen: Any + Send + Sync + fmt::Debug {}

impl<T: Any + Send + Sync + fmt::Debug> Screen for T {}

/// Recover the concrete screen type behind a `&dyn Screen`.
#[must_use]
pub fn downcast_screen<T: Screen>(screen: &dyn Screen) -> Option<&T> {
    (screen as &dyn Any).downcast_ref::<T>()
}

/// Identifier for a screen type.
///
/// Equality and hashing use only the `TypeId`; the name exists for error
/// messages and logging.
#[derive(Clone, Copy)]
pub struct ScreenKind {
    id: TypeId,
    name: &'static str,
}

impl ScreenKind {
    /// The kind for screen type `T`.
    #[must_use]
    pub fn of<T: Screen>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Developer-readable name of the screen type (full module path).
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ScreenKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ScreenKind {}

impl Hash for ScreenKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScreenKind").field(&self.name).finish()
    }
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct PoemList;

    #[derive(Debug)]
    struct PoemDetail;

    #[test]
    fn kinds_of_distinct_types_differ() {
        assert_ne!(ScreenKind::of::<PoemList>(), ScreenKind::of::<PoemDetail>());
        assert_eq!(ScreenKind::of::<PoemList>(), ScreenKind::of::<PoemList>());
    }

    #[test]
    fn kind_name_mentions_the_type() {
        let kind = ScreenKind::of::<PoemList>();
        assert!(kind.name().contains("PoemList"));
        assert!(kind.to_string().contains("PoemList"));
    }

    #[test]
    fn downcast_round_trip() {
        let screen = PoemList;
        let dynamic: &dyn Screen = &screen;
        assert!(downcast_screen::<PoemList>(dynamic).is_some());
        assert!(downcast_screen::<PoemDetail>(dynamic).is_none());
    }
}
