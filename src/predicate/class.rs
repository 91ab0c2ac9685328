//! Class and interface checks

use crate::error::Error;
use crate::reflector::Reflector;
use crate::value::Value;

/// Returns true if `value` is a string naming a declared class.
pub fn is_defined_class(cx: &Reflector, value: &Value) -> bool {
    value.as_str().is_some_and(|name| cx.registry().is_class(name))
}

/// Returns true if `value` is a string naming a declared interface.
pub fn is_defined_interface(cx: &Reflector, value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|name| cx.registry().is_interface(name))
}

/// Returns true if `value` is a string naming a declared class or interface.
pub fn is_defined_object_type(cx: &Reflector, value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|name| cx.registry().class(name).is_some())
}

/// Returns true if `value` is an object whose rank list contains
/// `type_name`.
///
/// Besides the class, its ancestors and interfaces, that includes the
/// structural labels objects rank under: `Object`, the fallback, and
/// `String` or `Callable` for stringable or invocable classes.
///
/// # Example
///
/// ```rust
/// use duckcheck::predicate::is_object_of_type;
/// use duckcheck::{ClassDef, ClassRegistry, Object, Reflector, Value};
///
/// let registry = ClassRegistry::builder()
///     .declare(ClassDef::class("Queue").implements("Countable"))
///     .build()
///     .unwrap();
/// let cx = Reflector::new(registry);
/// let queue = Value::from(Object::new("Queue"));
///
/// assert!(is_object_of_type(&cx, &queue, "Countable"));
/// assert!(!is_object_of_type(&cx, &queue, "Iterator"));
/// assert!(is_object_of_type(&cx, &queue, "Object"));
/// assert!(!is_object_of_type(&cx, &Value::from("Queue"), "Queue"));
/// ```
pub fn is_object_of_type(cx: &Reflector, value: &Value, type_name: &str) -> bool {
    matches!(value, Value::Object(_)) && cx.matches(value, type_name)
}

/// Predicate form of [`is_object_of_type`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectOfType(String);

impl ObjectOfType {
    /// The required type.
    pub fn type_name(&self) -> &str {
        &self.0
    }
}

impl super::Predicate for ObjectOfType {
    fn check(&self, cx: &Reflector, value: &Value) -> bool {
        is_object_of_type(cx, value, &self.0)
    }
}

/// Create a predicate that holds for objects of `type_name`.
pub fn object_of_type(type_name: impl Into<String>) -> ObjectOfType {
    ObjectOfType(type_name.into())
}

/// Returns true if `data` can be used where `constraint` is expected.
///
/// `constraint` is an object (its class is used) or a string naming a
/// declared class or interface. `data` is either an object, checked as an
/// instance, or a string naming a declared class or interface, checked
/// through its ancestors and interfaces.
///
/// # Errors
///
/// [`Error::UnsupportedType`] if either argument has any other shape.
///
/// # Example
///
/// ```rust
/// use duckcheck::predicate::is_compatible_with;
/// use duckcheck::{ClassDef, ClassRegistry, Object, Reflector, Value};
///
/// let registry = ClassRegistry::builder()
///     .declare(ClassDef::class("Repo").implements("Countable"))
///     .declare(ClassDef::class("Other"))
///     .build()
///     .unwrap();
/// let cx = Reflector::new(registry);
///
/// assert_eq!(is_compatible_with(&cx, &Value::from("Repo"), &Value::from("Countable")), Ok(true));
/// assert_eq!(is_compatible_with(&cx, &Value::from("Other"), &Value::from("Countable")), Ok(false));
/// assert_eq!(
///     is_compatible_with(&cx, &Value::from(Object::new("Repo")), &Value::from(Object::new("Repo"))),
///     Ok(true)
/// );
/// assert!(is_compatible_with(&cx, &Value::from(1), &Value::from("Countable")).is_err());
/// ```
pub fn is_compatible_with(cx: &Reflector, data: &Value, constraint: &Value) -> Result<bool, Error> {
    let registry = cx.registry();
    let target = match constraint {
        Value::Object(object) => object.class(),
        Value::Str(name) if registry.class(name).is_some() => name.as_str(),
        other => return Err(Error::unsupported(other.type_description(), "is_compatible_with")),
    };
    match data {
        Value::Object(_) => Ok(cx.matches(data, target)),
        Value::Str(name) if registry.class(name).is_some() => Ok(cx.matches(data, target)),
        other => Err(Error::unsupported(other.type_description(), "is_compatible_with")),
    }
}

/// Predicate form of [`is_compatible_with`]. Unsupported shapes do not
/// hold.
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibleWith(Value);

impl CompatibleWith {
    /// The constraint values are checked against.
    pub fn constraint(&self) -> &Value {
        &self.0
    }
}

impl super::Predicate for CompatibleWith {
    fn check(&self, cx: &Reflector, value: &Value) -> bool {
        is_compatible_with(cx, value, &self.0).unwrap_or(false)
    }
}

/// Create a predicate that holds for values compatible with `constraint`.
pub fn compatible_with(constraint: impl Into<Value>) -> CompatibleWith {
    CompatibleWith(constraint.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::{ClassDef, ClassRegistry};
    use crate::predicate::Predicate;
    use crate::value::Object;

    fn cx() -> Reflector {
        let registry = ClassRegistry::builder()
            .declare(ClassDef::interface("Repository").extends("Countable"))
            .declare(ClassDef::class("BaseRepo").implements("Repository"))
            .declare(ClassDef::class("UserRepo").extends("BaseRepo"))
            .declare(ClassDef::class("Unrelated"))
            .build()
            .unwrap();
        Reflector::new(registry)
    }

    #[test]
    fn test_defined_names() {
        let cx = cx();
        assert!(is_defined_class(&cx, &Value::from("UserRepo")));
        assert!(!is_defined_class(&cx, &Value::from("Repository")));
        assert!(is_defined_interface(&cx, &Value::from("Repository")));
        assert!(!is_defined_interface(&cx, &Value::from("UserRepo")));
        assert!(is_defined_object_type(&cx, &Value::from("UserRepo")));
        assert!(is_defined_object_type(&cx, &Value::from("Countable")));
        assert!(!is_defined_object_type(&cx, &Value::from("Missing")));
        assert!(!is_defined_class(&cx, &Value::from(Object::new("UserRepo"))));
    }

    #[test]
    fn test_object_of_type() {
        let cx = cx();
        let repo = Value::from(Object::new("UserRepo"));
        for ty in ["UserRepo", "BaseRepo", "Repository", "Countable"] {
            assert!(is_object_of_type(&cx, &repo, ty), "{ty}");
        }
        assert!(!is_object_of_type(&cx, &repo, "Unrelated"));
        assert!(object_of_type("Countable").check(&cx, &repo));
    }

    #[test]
    fn test_object_of_type_includes_structural_labels() {
        let cx = cx();
        let repo = Value::from(Object::new("UserRepo"));
        assert!(is_object_of_type(&cx, &repo, "Object"));
        assert!(is_object_of_type(&cx, &repo, "Mixed"));
        assert!(!is_object_of_type(&cx, &repo, "String"));
        assert!(!is_object_of_type(&cx, &repo, "Callable"));
        assert!(!is_object_of_type(&cx, &Value::Null, "Mixed"));
    }

    #[test]
    fn test_class_names_compatible_with_interfaces() {
        let cx = cx();
        for class in ["BaseRepo", "UserRepo"] {
            for iface in ["Repository", "Countable"] {
                assert_eq!(
                    is_compatible_with(&cx, &Value::from(class), &Value::from(iface)),
                    Ok(true),
                    "{class} vs {iface}"
                );
            }
        }
        assert_eq!(
            is_compatible_with(&cx, &Value::from("Unrelated"), &Value::from("Repository")),
            Ok(false)
        );
        assert_eq!(
            is_compatible_with(&cx, &Value::from("BaseRepo"), &Value::from("UserRepo")),
            Ok(false)
        );
    }

    #[test]
    fn test_objects_compatible_with_classes() {
        let cx = cx();
        let repo = Value::from(Object::new("UserRepo"));
        assert_eq!(is_compatible_with(&cx, &repo, &Value::from("BaseRepo")), Ok(true));
        assert_eq!(
            is_compatible_with(&cx, &repo, &Value::from(Object::new("Unrelated"))),
            Ok(false)
        );
    }

    #[test]
    fn test_unsupported_shapes() {
        let cx = cx();
        let err = is_compatible_with(&cx, &Value::from(1), &Value::from("BaseRepo")).unwrap_err();
        assert!(err.is_unsupported_type());

        let err = is_compatible_with(&cx, &Value::from("BaseRepo"), &Value::from("Missing"))
            .unwrap_err();
        assert_eq!(err, Error::unsupported("String", "is_compatible_with"));

        assert!(!compatible_with("Missing").check(&cx, &Value::from("BaseRepo")));
        assert!(compatible_with("Countable").check(&cx, &Value::from("BaseRepo")));
    }
}
