//! Predicate prelude for convenient imports
//!
//! # Example
//!
//! ```rust
//! use duckcheck::predicate::prelude::*;
//! use duckcheck::{ClassRegistry, Reflector, Value};
//!
//! let cx = Reflector::new(ClassRegistry::default());
//! assert!(is_numeric.or(is_logical).check(&cx, &Value::from(true)));
//! ```

// Core trait
pub use super::combinators::{Predicate, PredicateExt};

// Logical combinators
pub use super::combinators::{all_of, any_of, And, Not, Or};

// Checks
pub use super::class::{
    compatible_with, is_compatible_with, is_defined_class, is_defined_interface,
    is_defined_object_type, is_object_of_type, object_of_type,
};
pub use super::empty::is_empty;
pub use super::kind::{
    blacklisted, is_assignable, is_blacklisted, is_callable, is_indexable, is_logical,
    is_stringy, is_traversable,
};
pub use super::number::{is_integery, is_numeric};
