//! Predicate checks over dynamic values
//!
//! Every check is a plain function `fn(&Reflector, &Value) -> bool` (or takes
//! one extra argument describing what to compare against). Checks are pure:
//! asking twice gives the same answer.
//!
//! Because plain check functions implement [`Predicate`], they can be
//! composed with `and`, `or` and `not`.
//!
//! # Example
//!
//! ```rust
//! use duckcheck::predicate::*;
//! use duckcheck::{ClassDef, ClassRegistry, Object, Reflector, Value};
//!
//! let registry = ClassRegistry::builder()
//!     .declare(ClassDef::class("Cart").implements("Iterator"))
//!     .build()
//!     .unwrap();
//! let cx = Reflector::new(registry);
//!
//! let cart = Value::from(Object::new("Cart").with_property("items", Vec::<Value>::new()));
//! assert!(is_traversable(&cx, &cart));
//! assert!(is_empty(&cx, &cart));
//!
//! let has_items = is_traversable.and(is_empty.not());
//! assert!(!has_items.check(&cx, &cart));
//! assert!(has_items.check(&cx, &Value::from(vec![1, 2])));
//! ```

mod class;
mod combinators;
mod empty;
mod kind;
mod number;

pub mod prelude;

// Re-export core trait
pub use combinators::{Predicate, PredicateExt};

// Re-export combinator types
pub use combinators::{all_of, any_of, AllOf, And, AnyOf, Not, Or};

pub use empty::is_empty;

pub use kind::{
    blacklisted, is_assignable, is_blacklisted, is_callable, is_indexable, is_logical,
    is_stringy, is_traversable, Blacklisted,
};

pub use number::{is_integery, is_numeric};

pub use class::{
    compatible_with, is_compatible_with, is_defined_class, is_defined_interface,
    is_defined_object_type, is_object_of_type, object_of_type, CompatibleWith, ObjectOfType,
};
