//! Structural kind checks
//!
//! Each check answers whether a value can be *used as* something, which for
//! objects depends on the interfaces and capabilities its class declares.

use crate::class::Capability;
use crate::label::TypeLabel;
use crate::reflector::Reflector;
use crate::value::Value;

/// Returns true if `value` can be used as a read-only string: a string, or
/// an object whose class is `Stringable`.
///
/// # Example
///
/// ```rust
/// use duckcheck::predicate::is_stringy;
/// use duckcheck::{Capability, ClassDef, ClassRegistry, Object, Reflector, Value};
///
/// let registry = ClassRegistry::builder()
///     .declare(ClassDef::class("Name").capability(Capability::Stringable))
///     .declare(ClassDef::class("Point"))
///     .build()
///     .unwrap();
/// let cx = Reflector::new(registry);
///
/// assert!(is_stringy(&cx, &Value::from("text")));
/// assert!(is_stringy(&cx, &Value::from(Object::new("Name"))));
/// assert!(!is_stringy(&cx, &Value::from(Object::new("Point"))));
/// assert!(!is_stringy(&cx, &Value::from(42)));
/// ```
pub fn is_stringy(cx: &Reflector, value: &Value) -> bool {
    match value {
        Value::Str(_) => true,
        Value::Object(object) => cx
            .registry()
            .has_capability(object.class(), Capability::Stringable),
        _ => false,
    }
}

/// Returns true if `value` can be iterated element by element: an array,
/// or an object implementing `Traversable`.
pub fn is_traversable(cx: &Reflector, value: &Value) -> bool {
    match value {
        Value::Array(_) => true,
        Value::Object(object) => cx
            .registry()
            .is_subtype_of(object.class(), TypeLabel::TRAVERSABLE.as_str()),
        _ => false,
    }
}

/// Returns true if `value` supports index access: an array, or an object
/// implementing `ArrayAccess`.
pub fn is_indexable(cx: &Reflector, value: &Value) -> bool {
    match value {
        Value::Array(_) => true,
        Value::Object(object) => cx.registry().is_subtype_of(object.class(), "ArrayAccess"),
        _ => false,
    }
}

/// Returns true if elements or properties can be assigned on `value`.
pub fn is_assignable(_: &Reflector, value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

/// Returns true if `value` can be invoked: a registered function name, a
/// `Class::method` reference, a `[target, method]` pair, or an object whose
/// class is `Invocable`.
pub fn is_callable(cx: &Reflector, value: &Value) -> bool {
    cx.matches(value, TypeLabel::CALLABLE.as_str())
}

/// Returns true if `value` is a boolean.
pub fn is_logical(_: &Reflector, value: &Value) -> bool {
    matches!(value, Value::Bool(_))
}

/// Returns true if `value` is a string listed in `list`.
///
/// Stringable objects carry no string form of their own, so they are never
/// blacklisted.
pub fn is_blacklisted<S: AsRef<str>>(_: &Reflector, value: &Value, list: &[S]) -> bool {
    match value {
        Value::Str(s) => list.iter().any(|entry| entry.as_ref() == s.as_str()),
        _ => false,
    }
}

/// Predicate form of [`is_blacklisted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blacklisted(Vec<String>);

impl Blacklisted {
    /// The blacklisted strings.
    pub fn entries(&self) -> &[String] {
        &self.0
    }
}

impl super::Predicate for Blacklisted {
    fn check(&self, cx: &Reflector, value: &Value) -> bool {
        is_blacklisted(cx, value, &self.0)
    }
}

/// Create a predicate that holds for strings in `list`.
///
/// # Example
///
/// ```rust
/// use duckcheck::predicate::*;
/// use duckcheck::{ClassRegistry, Reflector, Value};
///
/// let cx = Reflector::new(ClassRegistry::default());
/// let reserved = blacklisted(["admin", "root"]);
///
/// assert!(reserved.check(&cx, &Value::from("root")));
/// assert!(!reserved.check(&cx, &Value::from("alice")));
/// ```
pub fn blacklisted<I, S>(list: I) -> Blacklisted
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Blacklisted(list.into_iter().map(Into::into).collect())
}
