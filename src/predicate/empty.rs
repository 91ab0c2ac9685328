//! Emptiness
//!
//! "Empty" is decided by the most specific of these rules that applies:
//!
//! - `Null` is always empty.
//! - A `String` is empty when nothing but whitespace is left after trimming.
//! - An `Array`, or an object implementing `Traversable`, is empty when
//!   every element is itself empty. A container with no elements is empty.
//! - Anything else is not empty.
//!
//! Containers are walked depth first. Values own their children, so the
//! walk always terminates.

use std::sync::LazyLock;

use crate::dispatch::DispatchTable;
use crate::label::TypeLabel;
use crate::reflector::Reflector;
use crate::value::Value;

type EmptinessRule = fn(&Reflector, &Value) -> bool;

static RULES: LazyLock<DispatchTable<EmptinessRule>> = LazyLock::new(|| {
    DispatchTable::new()
        .with(TypeLabel::NULL, null_is_empty as EmptinessRule)
        .with(TypeLabel::STRING, string_is_empty)
        .with(TypeLabel::ARRAY, array_is_empty)
        .with(TypeLabel::TRAVERSABLE, traversable_is_empty)
});

/// Returns true if `value` is empty.
///
/// # Example
///
/// ```rust
/// use duckcheck::predicate::is_empty;
/// use duckcheck::{ClassRegistry, Reflector, Value};
///
/// let cx = Reflector::new(ClassRegistry::default());
///
/// assert!(is_empty(&cx, &Value::Null));
/// assert!(is_empty(&cx, &Value::from(" \t\n")));
/// assert!(is_empty(&cx, &Value::from(vec!["", "  "])));
/// assert!(!is_empty(&cx, &Value::from(vec!["", "x"])));
/// assert!(!is_empty(&cx, &Value::from(0)));
/// ```
pub fn is_empty(cx: &Reflector, value: &Value) -> bool {
    match cx.dispatch(value, &*RULES).into_handler() {
        Some(rule) => rule(cx, value),
        None => false,
    }
}

fn null_is_empty(_: &Reflector, _: &Value) -> bool {
    true
}

fn string_is_empty(_: &Reflector, value: &Value) -> bool {
    // Stringable objects also rank as String; they are never empty.
    value.as_str().is_some_and(|s| s.trim().is_empty())
}

fn array_is_empty(cx: &Reflector, value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(|item| is_empty(cx, item)))
}

fn traversable_is_empty(cx: &Reflector, value: &Value) -> bool {
    // Strings naming a Traversable class rank here too; they are not
    // containers.
    value
        .as_object()
        .is_some_and(|object| object.values().all(|item| is_empty(cx, item)))
}
