//! Requirement wrappers
//!
//! Each `require_*` function runs the matching check from
//! [`predicate`](crate::predicate) and turns a `false` into an
//! [`Error::ValueRejected`] naming the value. Use them at call sites that
//! should fail fast with a descriptive error.
//!
//! [`Requirements`] runs several requirements and reports every failure at
//! once instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use duckcheck::require::{require_numeric, require_stringy};
//! use duckcheck::{ClassRegistry, Reflector, Requirement, Value};
//!
//! let cx = Reflector::new(ClassRegistry::default());
//!
//! assert!(require_stringy(&cx, &Value::from("abc"), "title").is_ok());
//!
//! let err = require_numeric(&cx, &Value::from("abc"), "price").unwrap_err();
//! assert_eq!(err.requirement(), Some(&Requirement::Numeric));
//! assert_eq!(err.to_string(), "price must be numeric (got String)");
//! ```

use crate::error::{Error, Requirement};
use crate::predicate::{self, Predicate, PredicateExt};
use crate::reflector::Reflector;
use crate::value::Value;

/// Run `predicate` on `value`; reject it as failing `requirement` if false.
///
/// # Example
///
/// ```rust
/// use duckcheck::require::require;
/// use duckcheck::{ClassRegistry, Reflector, Requirement, Value};
///
/// let cx = Reflector::new(ClassRegistry::default());
/// let even = |_: &Reflector, v: &Value| matches!(v, Value::Int(i) if i % 2 == 0);
///
/// assert!(require(&cx, &Value::from(4), "count", even, Requirement::Custom("must be even".into())).is_ok());
///
/// let err = require(&cx, &Value::from(3), "count", even, Requirement::Custom("must be even".into()));
/// assert_eq!(err.unwrap_err().to_string(), "count must be even (got Integer)");
/// ```
pub fn require<P: Predicate>(
    cx: &Reflector,
    value: &Value,
    name: &str,
    predicate: P,
    requirement: Requirement,
) -> Result<(), Error> {
    if predicate.check(cx, value) {
        return Ok(());
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        value_name = name,
        requirement = %requirement,
        value_type = %value.type_description(),
        "value rejected"
    );

    Err(Error::rejected(name, requirement, value.type_description()))
}

/// Reject empty values. See [`predicate::is_empty`].
pub fn require_not_empty(cx: &Reflector, value: &Value, name: &str) -> Result<(), Error> {
    require(cx, value, name, predicate::is_empty.not(), Requirement::NotEmpty)
}

/// Reject values that are not stringy. See [`predicate::is_stringy`].
pub fn require_stringy(cx: &Reflector, value: &Value, name: &str) -> Result<(), Error> {
    require(cx, value, name, predicate::is_stringy, Requirement::Stringy)
}

/// Reject values that cannot be iterated. See [`predicate::is_traversable`].
pub fn require_traversable(cx: &Reflector, value: &Value, name: &str) -> Result<(), Error> {
    require(cx, value, name, predicate::is_traversable, Requirement::Traversable)
}

/// Reject values without index access. See [`predicate::is_indexable`].
pub fn require_indexable(cx: &Reflector, value: &Value, name: &str) -> Result<(), Error> {
    require(cx, value, name, predicate::is_indexable, Requirement::Indexable)
}

/// Reject values that cannot be assigned to. See [`predicate::is_assignable`].
pub fn require_assignable(cx: &Reflector, value: &Value, name: &str) -> Result<(), Error> {
    require(cx, value, name, predicate::is_assignable, Requirement::Assignable)
}

/// Reject values that cannot be invoked. See [`predicate::is_callable`].
pub fn require_callable(cx: &Reflector, value: &Value, name: &str) -> Result<(), Error> {
    require(cx, value, name, predicate::is_callable, Requirement::Callable)
}

/// Reject non-numeric values. See [`predicate::is_numeric`].
pub fn require_numeric(cx: &Reflector, value: &Value, name: &str) -> Result<(), Error> {
    require(cx, value, name, predicate::is_numeric, Requirement::Numeric)
}

/// Reject values without an integral value. See [`predicate::is_integery`].
pub fn require_integery(cx: &Reflector, value: &Value, name: &str) -> Result<(), Error> {
    require(cx, value, name, predicate::is_integery, Requirement::Integery)
}

/// Reject non-booleans. See [`predicate::is_logical`].
pub fn require_logical(cx: &Reflector, value: &Value, name: &str) -> Result<(), Error> {
    require(cx, value, name, predicate::is_logical, Requirement::Logical)
}

/// Reject anything but the name of a declared class.
pub fn require_defined_class(cx: &Reflector, value: &Value, name: &str) -> Result<(), Error> {
    require(cx, value, name, predicate::is_defined_class, Requirement::DefinedClass)
}

/// Reject anything but the name of a declared interface.
pub fn require_defined_interface(cx: &Reflector, value: &Value, name: &str) -> Result<(), Error> {
    require(
        cx,
        value,
        name,
        predicate::is_defined_interface,
        Requirement::DefinedInterface,
    )
}

/// Reject anything but the name of a declared class or interface.
pub fn require_defined_object_type(
    cx: &Reflector,
    value: &Value,
    name: &str,
) -> Result<(), Error> {
    require(
        cx,
        value,
        name,
        predicate::is_defined_object_type,
        Requirement::DefinedObjectType,
    )
}

/// Reject anything but an object of `type_name`.
pub fn require_object_of_type(
    cx: &Reflector,
    value: &Value,
    type_name: &str,
    name: &str,
) -> Result<(), Error> {
    require(
        cx,
        value,
        name,
        predicate::object_of_type(type_name),
        Requirement::ObjectOfType(type_name.to_string()),
    )
}

/// Reject `data` unless it is compatible with `constraint`.
///
/// # Errors
///
/// [`Error::UnsupportedType`] when either argument has a shape
/// [`predicate::is_compatible_with`] cannot handle, otherwise
/// [`Error::ValueRejected`] when the types are unrelated.
pub fn require_compatible_with(
    cx: &Reflector,
    data: &Value,
    constraint: &Value,
    name: &str,
) -> Result<(), Error> {
    if predicate::is_compatible_with(cx, data, constraint)? {
        return Ok(());
    }
    let constraint_name = match constraint {
        Value::Object(object) => object.class().to_string(),
        Value::Str(s) => s.clone(),
        other => other.type_description(),
    };
    Err(Error::rejected(
        name,
        Requirement::CompatibleWith(constraint_name),
        data.type_description(),
    ))
}

/// Reject strings that appear in `list`.
pub fn require_not_blacklisted<S: AsRef<str>>(
    cx: &Reflector,
    value: &Value,
    list: &[S],
    name: &str,
) -> Result<(), Error> {
    if predicate::is_blacklisted(cx, value, list) {
        return Err(Error::rejected(
            name,
            Requirement::NotBlacklisted,
            value.type_description(),
        ));
    }
    Ok(())
}

/// Runs several requirements and collects every rejection.
///
/// # Example
///
/// ```rust
/// use duckcheck::predicate::{is_numeric, is_stringy};
/// use duckcheck::require::Requirements;
/// use duckcheck::{ClassRegistry, Reflector, Requirement, Value};
///
/// let cx = Reflector::new(ClassRegistry::default());
///
/// let errors = Requirements::new(&cx)
///     .check(&Value::from(1), "title", is_stringy, Requirement::Stringy)
///     .check(&Value::from("x"), "price", is_numeric, Requirement::Numeric)
///     .check(&Value::from("y"), "label", is_stringy, Requirement::Stringy)
///     .finish()
///     .unwrap_err();
///
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors[1].to_string(), "price must be numeric (got String)");
/// ```
#[derive(Debug)]
pub struct Requirements<'cx> {
    cx: &'cx Reflector,
    errors: Vec<Error>,
}

impl<'cx> Requirements<'cx> {
    /// Start with no failures.
    pub fn new(cx: &'cx Reflector) -> Self {
        Requirements {
            cx,
            errors: Vec::new(),
        }
    }

    /// Run one requirement, remembering the failure if any.
    pub fn check<P: Predicate>(
        self,
        value: &Value,
        name: &str,
        predicate: P,
        requirement: Requirement,
    ) -> Self {
        let cx = self.cx;
        self.with(require(cx, value, name, predicate, requirement))
    }

    /// Record the outcome of any `require_*` call.
    pub fn with(mut self, outcome: Result<(), Error>) -> Self {
        if let Err(err) = outcome {
            self.errors.push(err);
        }
        self
    }

    /// Returns true if nothing failed so far.
    pub fn is_satisfied(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok` if every requirement held, otherwise all failures in order.
    pub fn finish(self) -> Result<(), Vec<Error>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::{Capability, ClassDef, ClassRegistry};
    use crate::value::Object;

    fn cx() -> Reflector {
        let registry = ClassRegistry::builder()
            .declare(ClassDef::class("Logger").implements("Countable"))
            .declare(ClassDef::class("Title").capability(Capability::Stringable))
            .function("printf")
            .build()
            .unwrap();
        Reflector::new(registry)
    }

    fn rejected_with(result: Result<(), Error>) -> Requirement {
        match result {
            Err(Error::ValueRejected { requirement, .. }) => requirement,
            other => panic!("expected a rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_require_not_empty() {
        let cx = cx();
        assert!(require_not_empty(&cx, &Value::from("x"), "v").is_ok());
        assert_eq!(
            rejected_with(require_not_empty(&cx, &Value::from(vec![""]), "v")),
            Requirement::NotEmpty
        );
    }

    #[test]
    fn test_kind_requirements() {
        let cx = cx();
        let title = Value::from(Object::new("Title"));
        assert!(require_stringy(&cx, &title, "t").is_ok());
        assert!(require_assignable(&cx, &title, "t").is_ok());
        assert!(require_callable(&cx, &Value::from("printf"), "f").is_ok());
        assert!(require_traversable(&cx, &Value::Array(vec![]), "a").is_ok());
        assert!(require_indexable(&cx, &Value::Array(vec![]), "a").is_ok());
        assert!(require_logical(&cx, &Value::from(true), "b").is_ok());
        assert!(require_integery(&cx, &Value::from("10"), "n").is_ok());

        assert_eq!(
            rejected_with(require_traversable(&cx, &title, "t")),
            Requirement::Traversable
        );
        assert_eq!(
            rejected_with(require_indexable(&cx, &Value::from("abc"), "t")),
            Requirement::Indexable
        );
        assert_eq!(
            rejected_with(require_callable(&cx, &Value::from("nope"), "f")),
            Requirement::Callable
        );
        assert_eq!(
            rejected_with(require_logical(&cx, &Value::from(1), "b")),
            Requirement::Logical
        );
        assert_eq!(
            rejected_with(require_integery(&cx, &Value::from(1.5), "n")),
            Requirement::Integery
        );
        assert_eq!(
            rejected_with(require_assignable(&cx, &Value::Null, "n")),
            Requirement::Assignable
        );
    }

    #[test]
    fn test_defined_requirements() {
        let cx = cx();
        assert!(require_defined_class(&cx, &Value::from("Logger"), "c").is_ok());
        assert!(require_defined_interface(&cx, &Value::from("Countable"), "i").is_ok());
        assert!(require_defined_object_type(&cx, &Value::from("Countable"), "o").is_ok());

        let err = require_defined_class(&cx, &Value::from("Missing"), "$class").unwrap_err();
        assert_eq!(err.to_string(), "$class must name a defined class (got String)");
        assert_eq!(
            rejected_with(require_defined_interface(&cx, &Value::from("Logger"), "i")),
            Requirement::DefinedInterface
        );
        assert_eq!(
            rejected_with(require_defined_object_type(&cx, &Value::from(3), "o")),
            Requirement::DefinedObjectType
        );
    }

    #[test]
    fn test_require_object_of_type() {
        let cx = cx();
        let logger = Value::from(Object::new("Logger"));
        assert!(require_object_of_type(&cx, &logger, "Countable", "l").is_ok());
        assert_eq!(
            rejected_with(require_object_of_type(&cx, &logger, "Iterator", "l")),
            Requirement::ObjectOfType("Iterator".into())
        );
    }

    #[test]
    fn test_require_compatible_with() {
        let cx = cx();
        assert!(
            require_compatible_with(&cx, &Value::from("Logger"), &Value::from("Countable"), "c")
                .is_ok()
        );

        let err = require_compatible_with(
            &cx,
            &Value::from(Object::new("Logger")),
            &Value::from("Iterator"),
            "$logger",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "$logger must be compatible with Iterator (got object<Logger>)"
        );

        let err = require_compatible_with(&cx, &Value::Null, &Value::from("Iterator"), "x")
            .unwrap_err();
        assert!(err.is_unsupported_type());
    }

    #[test]
    fn test_require_not_blacklisted() {
        let cx = cx();
        assert!(require_not_blacklisted(&cx, &Value::from("bob"), &["root"], "user").is_ok());
        assert_eq!(
            rejected_with(require_not_blacklisted(&cx, &Value::from("root"), &["root"], "user")),
            Requirement::NotBlacklisted
        );
    }

    #[test]
    fn test_requirements_collects_in_order() {
        let cx = cx();
        let result = Requirements::new(&cx)
            .check(&Value::Null, "a", predicate::is_stringy, Requirement::Stringy)
            .with(require_numeric(&cx, &Value::from("1"), "b"))
            .with(require_logical(&cx, &Value::from("no"), "c"))
            .finish();

        let errors = result.unwrap_err();
        let names: Vec<_> = errors
            .iter()
            .map(|e| match e {
                Error::ValueRejected { name, .. } => name.as_str(),
                Error::UnsupportedType { .. } => "",
            })
            .collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_requirements_all_satisfied() {
        let cx = cx();
        let reqs = Requirements::new(&cx).with(require_numeric(&cx, &Value::from(1), "n"));
        assert!(reqs.is_satisfied());
        assert_eq!(reqs.finish(), Ok(()));
    }
}
