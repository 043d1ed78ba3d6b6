//! Property-based invariant tests for the composition root guard and
//! registry derivation.
//!
//! These tests verify the structural invariants of the root-application
//! contract:
//!
//! 1. Along any single chain of nested compose factories, the root is
//!    applied exactly once, at the outermost invocation.
//! 2. Independently-rooted compositions each get their own application;
//!    the flag never leaks between sibling traversals.
//! 3. Content passes through the guard unchanged (single wrap, never
//!    double).
//! 4. Registry derivation preserves the key set for any factory subset.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;
use weft_compose::{
    Composer, CompositionRoot, WithCompositionRoot, compose_screen, composition_root, show_screen,
};
use weft_core::{ScreenKind, View, ViewEnvironment, ViewFactory, ViewRegistry};

// ── Fixtures ──────────────────────────────────────────────────────────────

#[derive(Debug)]
struct Nest(u32);

fn counting_root(counter: Arc<AtomicUsize>) -> CompositionRoot {
    composition_root(move |composer, content| {
        counter.fetch_add(1, Ordering::SeqCst);
        View::stack([View::text("["), content.compose(composer), View::text("]")])
    })
}

/// Registry with a single self-recursive compose factory: `Nest(n)` shows
/// `Nest(n - 1)` through the registry until it bottoms out, so a depth-`n`
/// screen produces `n + 1` guarded invocations along one path.
fn nest_registry() -> ViewRegistry {
    ViewRegistry::new([compose_screen(
        |screen: &Nest, env: &ViewEnvironment, c: &mut Composer| {
            if screen.0 == 0 {
                View::text("leaf")
            } else {
                show_screen(c, &Nest(screen.0 - 1), env).expect("nest factory registered")
            }
        },
    )])
    .expect("no duplicate kinds")
}

// ─────────────────────────────────────────────────────────────────────────
// 1. + 3. Exactly one application per chain, single wrap
// ─────────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn chain_of_any_depth_wraps_exactly_once(depth in 0u32..16) {
        let counter = Arc::new(AtomicUsize::new(0));
        let env = ViewEnvironment::new()
            .with_registry(nest_registry())
            .with_composition_root(counting_root(counter.clone()));

        let view = show_screen(&mut Composer::root(), &Nest(depth), &env)
            .expect("lookup succeeds");

        prop_assert_eq!(counter.load(Ordering::SeqCst), 1);
        // Single bracket pair regardless of depth: never "[[leaf]]".
        prop_assert_eq!(view.flat_text(), "[leaf]");
    }
}

// ─────────────────────────────────────────────────────────────────────────
// 2. Sibling traversals are independent
// ─────────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn independent_traversals_each_apply_the_root(
        depths in prop::collection::vec(0u32..8, 1..8),
    ) {
        let counter = Arc::new(AtomicUsize::new(0));
        let env = ViewEnvironment::new()
            .with_registry(nest_registry())
            .with_composition_root(counting_root(counter.clone()));

        for depth in &depths {
            let view = show_screen(&mut Composer::root(), &Nest(*depth), &env)
                .expect("lookup succeeds");
            prop_assert_eq!(view.flat_text(), "[leaf]");
        }

        prop_assert_eq!(counter.load(Ordering::SeqCst), depths.len());
    }

    #[test]
    fn sequential_siblings_on_one_composer_each_apply_the_root(
        siblings in 1usize..8,
    ) {
        let counter = Arc::new(AtomicUsize::new(0));
        let env = ViewEnvironment::new()
            .with_registry(nest_registry())
            .with_composition_root(counting_root(counter.clone()));

        let mut composer = Composer::root();
        for _ in 0..siblings {
            show_screen(&mut composer, &Nest(0), &env).expect("lookup succeeds");
        }

        prop_assert_eq!(counter.load(Ordering::SeqCst), siblings);
    }
}

// ─────────────────────────────────────────────────────────────────────────
// 4. Derivation preserves the key set
// ─────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct S0;
#[derive(Debug)]
struct S1;
#[derive(Debug)]
struct S2;
#[derive(Debug)]
struct S3;
#[derive(Debug)]
struct S4;
#[derive(Debug)]
struct S5;

fn factory_pool(index: usize) -> Arc<dyn ViewFactory> {
    match index {
        0 => compose_screen(|_: &S0, _: &ViewEnvironment, _: &mut Composer| View::Empty),
        1 => compose_screen(|_: &S1, _: &ViewEnvironment, _: &mut Composer| View::Empty),
        2 => compose_screen(|_: &S2, _: &ViewEnvironment, _: &mut Composer| View::Empty),
        3 => compose_screen(|_: &S3, _: &ViewEnvironment, _: &mut Composer| View::Empty),
        4 => compose_screen(|_: &S4, _: &ViewEnvironment, _: &mut Composer| View::Empty),
        _ => compose_screen(|_: &S5, _: &ViewEnvironment, _: &mut Composer| View::Empty),
    }
}

proptest! {
    #[test]
    fn derived_registry_key_set_equals_base(
        indexes in prop::collection::hash_set(0usize..6, 0..=6),
    ) {
        let registry = ViewRegistry::new(indexes.iter().map(|i| factory_pool(*i)))
            .expect("pool kinds are distinct");
        let derived =
            registry.with_composition_root(composition_root(|c, content| content.compose(c)));

        let base_keys: std::collections::HashSet<ScreenKind> =
            registry.keys().into_iter().collect();
        let derived_keys: std::collections::HashSet<ScreenKind> =
            derived.keys().into_iter().collect();
        prop_assert_eq!(base_keys, derived_keys);
        prop_assert_eq!(derived.len(), indexes.len());
    }
}
