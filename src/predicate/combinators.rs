//! Core predicate trait and logical combinators
//!
//! This module provides the foundational `Predicate` trait and logical
//! combinators for composing checks over dynamic values.

use crate::reflector::Reflector;
use crate::value::Value;

/// A composable check over a [`Value`].
///
/// Every `fn(&Reflector, &Value) -> bool` is a predicate, so the plain
/// check functions of this module can be combined directly:
///
/// ```rust
/// use duckcheck::predicate::*;
/// use duckcheck::{ClassRegistry, Reflector, Value};
///
/// let cx = Reflector::new(ClassRegistry::default());
/// let filled_text = is_stringy.and(is_empty.not());
///
/// assert!(filled_text.check(&cx, &Value::from("hello")));
/// assert!(!filled_text.check(&cx, &Value::from("   ")));
/// assert!(!filled_text.check(&cx, &Value::from(42)));
/// ```
pub trait Predicate: Send + Sync {
    /// Check if the value satisfies this predicate.
    fn check(&self, cx: &Reflector, value: &Value) -> bool;
}

// Blanket impl for closures and check functions
impl<F> Predicate for F
where
    F: Fn(&Reflector, &Value) -> bool + Send + Sync,
{
    #[inline]
    fn check(&self, cx: &Reflector, value: &Value) -> bool {
        self(cx, value)
    }
}

/// Extension trait for predicate combinators.
pub trait PredicateExt: Predicate + Sized {
    /// Both predicates must hold.
    fn and<P: Predicate>(self, other: P) -> And<Self, P> {
        And(self, other)
    }

    /// Either predicate must hold.
    fn or<P: Predicate>(self, other: P) -> Or<Self, P> {
        Or(self, other)
    }

    /// Invert the predicate.
    fn not(self) -> Not<Self> {
        Not(self)
    }
}

impl<P: Predicate> PredicateExt for P {}

/// AND combinator - both predicates must be true.
#[derive(Clone, Copy, Debug)]
pub struct And<P1, P2>(pub P1, pub P2);

impl<P1: Predicate, P2: Predicate> Predicate for And<P1, P2> {
    #[inline]
    fn check(&self, cx: &Reflector, value: &Value) -> bool {
        self.0.check(cx, value) && self.1.check(cx, value)
    }
}

/// OR combinator - either predicate must be true.
#[derive(Clone, Copy, Debug)]
pub struct Or<P1, P2>(pub P1, pub P2);

impl<P1: Predicate, P2: Predicate> Predicate for Or<P1, P2> {
    #[inline]
    fn check(&self, cx: &Reflector, value: &Value) -> bool {
        self.0.check(cx, value) || self.1.check(cx, value)
    }
}

/// NOT combinator - inverts the predicate.
#[derive(Clone, Copy, Debug)]
pub struct Not<P>(pub P);

impl<P: Predicate> Predicate for Not<P> {
    #[inline]
    fn check(&self, cx: &Reflector, value: &Value) -> bool {
        !self.0.check(cx, value)
    }
}

/// Check if any predicate is satisfied.
///
/// Uses a fixed-size array; all predicates must have the same type. For
/// mixed predicates, use `.or()` chaining instead.
///
/// # Example
///
/// ```rust
/// use duckcheck::predicate::*;
/// use duckcheck::{ClassRegistry, Reflector, Value};
///
/// let cx = Reflector::new(ClassRegistry::default());
/// let known = any_of([object_of_type("Iterator"), object_of_type("Countable")]);
/// assert!(!known.check(&cx, &Value::from(1)));
/// ```
#[derive(Clone, Debug)]
pub struct AnyOf<P, const N: usize>(pub [P; N]);

impl<P: Predicate, const N: usize> Predicate for AnyOf<P, N> {
    #[inline]
    fn check(&self, cx: &Reflector, value: &Value) -> bool {
        self.0.iter().any(|p| p.check(cx, value))
    }
}

/// Create a predicate that holds if any of `predicates` holds.
pub fn any_of<P, const N: usize>(predicates: [P; N]) -> AnyOf<P, N> {
    AnyOf(predicates)
}

/// Check if all predicates are satisfied.
#[derive(Clone, Debug)]
pub struct AllOf<P, const N: usize>(pub [P; N]);

impl<P: Predicate, const N: usize> Predicate for AllOf<P, N> {
    #[inline]
    fn check(&self, cx: &Reflector, value: &Value) -> bool {
        self.0.iter().all(|p| p.check(cx, value))
    }
}

/// Create a predicate that holds if all of `predicates` hold.
pub fn all_of<P, const N: usize>(predicates: [P; N]) -> AllOf<P, N> {
    AllOf(predicates)
}
