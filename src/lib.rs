//! # Duckcheck
//!
//! Type introspection for dynamic values: predicate checks, requirement
//! wrappers and dispatch by runtime type.
//!
//! ## Pieces
//!
//! - [`Value`] is a tagged value of a dynamically typed language.
//! - [`ClassRegistry`] declares the classes, interfaces and functions those
//!   values refer to.
//! - [`Reflector`] computes a value's rank list: every type it can be
//!   treated as, most specific first, ending in a fallback label.
//! - [`DispatchTable`] and [`Dispatcher`] pick a handler by walking that
//!   list.
//! - [`predicate`] holds the `is_*` checks, [`require`] the failing
//!   `require_*` versions.
//!
//! ## Quick Example
//!
//! ```rust
//! use duckcheck::prelude::*;
//!
//! let registry = ClassRegistry::builder()
//!     .declare(ClassDef::class("Money").capability(Capability::Stringable))
//!     .declare(
//!         ClassDef::class("Formatter")
//!             .method("fromMoney")
//!             .method("fromString")
//!             .method("fromMixed"),
//!     )
//!     .build()
//!     .unwrap();
//! let cx = Reflector::new(registry);
//!
//! let price = Value::from(Object::new("Money").with_property("cents", 1250));
//!
//! assert!(is_stringy(&cx, &price));
//! assert!(!is_empty(&cx, &price));
//! assert_eq!(
//!     cx.lookup_method_by_type(&price, "Formatter", "from").unwrap(),
//!     "fromMoney"
//! );
//! assert_eq!(
//!     cx.lookup_method_by_type(&Value::from(7), "Formatter", "from").unwrap(),
//!     "fromMixed"
//! );
//!
//! require_not_empty(&cx, &Value::from("EUR"), "currency").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod cache;
pub mod class;
pub mod dispatch;
pub mod error;
pub mod label;
pub mod predicate;
pub mod reflector;
pub mod require;
pub mod value;

// Re-exports
pub use class::{Capability, ClassDef, ClassKind, ClassRegistry, RegistryBuilder};
pub use dispatch::{method_name, Dispatch, DispatchTable, Dispatcher};
pub use error::{Error, RegistryError, Requirement};
pub use label::TypeLabel;
pub use reflector::{RankList, Reflector, ReflectorConfig};
pub use value::{Object, Value};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::class::{Capability, ClassDef, ClassRegistry};
    pub use crate::dispatch::{Dispatch, DispatchTable, Dispatcher};
    pub use crate::error::{Error, Requirement};
    pub use crate::label::TypeLabel;
    pub use crate::predicate::prelude::*;
    pub use crate::reflector::{Reflector, ReflectorConfig};
    pub use crate::require::*;
    pub use crate::value::{Object, Value};
}
