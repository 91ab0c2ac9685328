//! Dispatch by runtime type
//!
//! Walk a value's rank list and pick the first label that has a handler.
//! The most specific type always wins; when nothing matches the result is
//! an explicit [`Dispatch::NotFound`], never an arbitrary handler.
//!
//! Handlers can be anything: closures, function pointers, enum tags, or
//! plain method names (see [`method_name`] and
//! [`Reflector::first_method_matching_type`]).
//!
//! # Example
//!
//! ```rust
//! use duckcheck::{ClassRegistry, DispatchTable, Reflector, TypeLabel, Value};
//!
//! let cx = Reflector::new(ClassRegistry::default());
//! let table = DispatchTable::new()
//!     .with(TypeLabel::STRING, "from_string")
//!     .with(TypeLabel::MIXED, "from_anything");
//!
//! assert_eq!(cx.dispatch(&Value::from("x"), &table).into_handler(), Some(&"from_string"));
//! assert_eq!(cx.dispatch(&Value::from(1), &table).into_handler(), Some(&"from_anything"));
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::cache::TypeCache;
use crate::error::Error;
use crate::label::TypeLabel;
use crate::reflector::Reflector;
use crate::value::Value;

/// A mapping from type label to handler.
#[derive(Clone)]
pub struct DispatchTable<H> {
    handlers: HashMap<TypeLabel, H>,
}

impl<H> DispatchTable<H> {
    /// Create an empty table.
    pub fn new() -> Self {
        DispatchTable {
            handlers: HashMap::new(),
        }
    }

    /// Add a handler, builder style.
    pub fn with(mut self, label: impl Into<TypeLabel>, handler: H) -> Self {
        self.insert(label, handler);
        self
    }

    /// Add or replace a handler. Returns the replaced one.
    pub fn insert(&mut self, label: impl Into<TypeLabel>, handler: H) -> Option<H> {
        self.handlers.insert(label.into(), handler)
    }

    /// The handler registered for exactly `label`.
    pub fn get(&self, label: &str) -> Option<&H> {
        self.handlers.get(label)
    }

    /// Returns true if `label` has a handler.
    pub fn contains(&self, label: &str) -> bool {
        self.handlers.contains_key(label)
    }

    /// Number of handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if the table has no handlers.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Labels with a handler, in no particular order.
    pub fn labels(&self) -> impl Iterator<Item = &TypeLabel> {
        self.handlers.keys()
    }

    /// The first label in `ranks` that has a handler.
    pub fn resolve(&self, ranks: &[TypeLabel]) -> Dispatch<&H> {
        ranks
            .iter()
            .find_map(|label| {
                self.handlers.get(label).map(|handler| Dispatch::Found {
                    label: label.clone(),
                    handler,
                })
            })
            .unwrap_or(Dispatch::NotFound)
    }
}

impl<H> Default for DispatchTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for DispatchTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels: Vec<&str> = self.handlers.keys().map(TypeLabel::as_str).collect();
        labels.sort_unstable();
        f.debug_struct("DispatchTable")
            .field("labels", &labels)
            .finish()
    }
}

impl<L: Into<TypeLabel>, H> FromIterator<(L, H)> for DispatchTable<H> {
    fn from_iter<I: IntoIterator<Item = (L, H)>>(iter: I) -> Self {
        DispatchTable {
            handlers: iter.into_iter().map(|(l, h)| (l.into(), h)).collect(),
        }
    }
}

/// Outcome of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<H> {
    /// A handler matched.
    Found {
        /// The rank-list label that matched.
        label: TypeLabel,
        /// Its handler.
        handler: H,
    },
    /// No label of the rank list has a handler.
    NotFound,
}

impl<H> Dispatch<H> {
    /// Returns true if a handler matched.
    pub fn is_found(&self) -> bool {
        matches!(self, Dispatch::Found { .. })
    }

    /// The matched handler.
    pub fn handler(&self) -> Option<&H> {
        match self {
            Dispatch::Found { handler, .. } => Some(handler),
            Dispatch::NotFound => None,
        }
    }

    /// The label that matched.
    pub fn label(&self) -> Option<&TypeLabel> {
        match self {
            Dispatch::Found { label, .. } => Some(label),
            Dispatch::NotFound => None,
        }
    }

    /// Take the handler.
    pub fn into_handler(self) -> Option<H> {
        match self {
            Dispatch::Found { handler, .. } => Some(handler),
            Dispatch::NotFound => None,
        }
    }

    /// Transform the handler.
    pub fn map<U, F: FnOnce(H) -> U>(self, f: F) -> Dispatch<U> {
        match self {
            Dispatch::Found { label, handler } => Dispatch::Found {
                label,
                handler: f(handler),
            },
            Dispatch::NotFound => Dispatch::NotFound,
        }
    }

    /// Take the handler, or report `value` as unsupported by `operation`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use duckcheck::{ClassRegistry, DispatchTable, Reflector, TypeLabel, Value};
    ///
    /// let cx = Reflector::new(ClassRegistry::default());
    /// let table = DispatchTable::new().with(TypeLabel::ARRAY, 1);
    ///
    /// let err = cx
    ///     .dispatch(&Value::from(3), &table)
    ///     .into_result(&Value::from(3), "count")
    ///     .unwrap_err();
    /// assert_eq!(err.to_string(), "count does not support type Integer");
    /// ```
    pub fn into_result(self, value: &Value, operation: &'static str) -> Result<H, Error> {
        self.into_handler()
            .ok_or_else(|| Error::unsupported(value.type_description(), operation))
    }
}

impl Reflector {
    /// Pick the handler for the most specific type of `value`.
    pub fn dispatch<'t, H>(&self, value: &Value, table: &'t DispatchTable<H>) -> Dispatch<&'t H> {
        let found = table.resolve(&self.ranks(value));

        #[cfg(feature = "tracing")]
        if !found.is_found() {
            tracing::debug!(
                value_type = %value.type_description(),
                handlers = table.len(),
                "no handler for any matching type"
            );
        }

        found
    }

    /// The first `prefix + type` method that `target_class` declares, walking
    /// the rank list of `value` most specific first.
    ///
    /// # Example
    ///
    /// ```rust
    /// use duckcheck::{ClassDef, ClassRegistry, Reflector, Value};
    ///
    /// let registry = ClassRegistry::builder()
    ///     .declare(
    ///         ClassDef::class("Converter")
    ///             .method("fromString")
    ///             .method("fromMixed"),
    ///     )
    ///     .build()
    ///     .unwrap();
    /// let cx = Reflector::new(registry);
    ///
    /// let method = cx.first_method_matching_type(&Value::from("x"), "Converter", "from");
    /// assert_eq!(method.as_deref(), Some("fromString"));
    ///
    /// let method = cx.first_method_matching_type(&Value::from(1), "Converter", "from");
    /// assert_eq!(method.as_deref(), Some("fromMixed"));
    /// ```
    pub fn first_method_matching_type(
        &self,
        value: &Value,
        target_class: &str,
        prefix: &str,
    ) -> Option<String> {
        let registry = self.registry();
        self.ranks(value)
            .iter()
            .map(|label| method_name(prefix, label))
            .find(|method| registry.has_method(target_class, method))
    }

    /// Like [`first_method_matching_type`](Self::first_method_matching_type),
    /// but a value with no matching method is an
    /// [`Error::UnsupportedType`].
    pub fn lookup_method_by_type(
        &self,
        value: &Value,
        target_class: &str,
        prefix: &str,
    ) -> Result<String, Error> {
        self.first_method_matching_type(value, target_class, prefix)
            .ok_or_else(|| Error::unsupported(value.type_description(), "lookup_method_by_type"))
    }
}

/// The handler method name for `label`: `prefix` followed by the last
/// segment of the label.
///
/// # Example
///
/// ```rust
/// use duckcheck::{method_name, TypeLabel};
///
/// assert_eq!(method_name("from", &TypeLabel::new("App\\Model\\User")), "fromUser");
/// assert_eq!(method_name("from", &TypeLabel::STRING), "fromString");
/// ```
pub fn method_name(prefix: &str, label: &TypeLabel) -> String {
    format!("{}{}", prefix, label.short_name())
}

/// A dispatch table bound to a [`Reflector`] that remembers which label
/// matched for each cached runtime type.
///
/// # Example
///
/// ```rust
/// use duckcheck::{ClassRegistry, DispatchTable, Dispatcher, Object, Reflector, TypeLabel, Value};
///
/// let cx = Reflector::new(ClassRegistry::default());
/// let describe = Dispatcher::new(
///     &cx,
///     "describe",
///     DispatchTable::new()
///         .with(TypeLabel::OBJECT, "an object")
///         .with(TypeLabel::NULL, "nothing"),
/// );
///
/// assert_eq!(describe.call(&Value::Null), Ok(&"nothing"));
/// assert_eq!(describe.call(&Value::from(Object::new("Foo"))), Ok(&"an object"));
/// assert!(describe.call(&Value::from(1)).is_err());
/// ```
pub struct Dispatcher<'cx, H> {
    cx: &'cx Reflector,
    operation: &'static str,
    table: DispatchTable<H>,
    matched: TypeCache<Option<TypeLabel>>,
}

impl<'cx, H> Dispatcher<'cx, H> {
    /// Bind `table` to `cx`. `operation` names the dispatcher in errors.
    pub fn new(cx: &'cx Reflector, operation: &'static str, table: DispatchTable<H>) -> Self {
        Dispatcher {
            cx,
            operation,
            table,
            matched: TypeCache::new(),
        }
    }

    /// The underlying table.
    pub fn table(&self) -> &DispatchTable<H> {
        &self.table
    }

    /// Pick the handler for `value`.
    pub fn resolve(&self, value: &Value) -> Dispatch<&H> {
        let Some(key) = self.cx.cache_key(value) else {
            return self.cx.dispatch(value, &self.table);
        };
        let label = self.matched.get_or_insert_with(&key, || {
            self.cx.dispatch(value, &self.table).label().cloned()
        });
        match label.and_then(|label| self.table.get(label.as_str()).map(|h| (label, h))) {
            Some((label, handler)) => Dispatch::Found { label, handler },
            None => Dispatch::NotFound,
        }
    }

    /// Pick the handler for `value`, or fail with
    /// [`Error::UnsupportedType`].
    pub fn call(&self, value: &Value) -> Result<&H, Error> {
        self.resolve(value).into_result(value, self.operation)
    }

    /// Forget which labels matched.
    pub fn reset(&self) {
        self.matched.reset();
    }
}

impl<H> fmt::Debug for Dispatcher<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("operation", &self.operation)
            .field("table", &self.table)
            .field("matched", &self.matched)
            .finish()
    }
}
