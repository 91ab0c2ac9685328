//! Error types
//!
//! Checks themselves return `bool`. Errors only appear where a caller asked
//! for something to be enforced ([`Error::ValueRejected`]) or where the
//! input has a shape no rule applies to ([`Error::UnsupportedType`]).

use std::fmt;

/// The ways an operation on a value can fail.
///
/// # Example
///
/// ```rust
/// use duckcheck::{ClassRegistry, Reflector, Value};
/// use duckcheck::require::require_not_empty;
///
/// let cx = Reflector::new(ClassRegistry::builder().build().unwrap());
/// let err = require_not_empty(&cx, &Value::from("  "), "username").unwrap_err();
///
/// assert!(err.is_value_rejected());
/// assert_eq!(err.to_string(), "username must not be empty (got String)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No rule applies to the input's runtime type.
    UnsupportedType {
        /// Description of the offending value's type.
        type_name: String,
        /// The operation that could not handle it.
        operation: &'static str,
    },
    /// A requirement was checked and the value failed it.
    ValueRejected {
        /// Caller-supplied name of the value, for the message.
        name: String,
        /// What the value had to satisfy.
        requirement: Requirement,
        /// Description of the offending value's type.
        type_name: String,
    },
}

impl Error {
    /// Create an [`Error::UnsupportedType`].
    pub fn unsupported(type_name: impl Into<String>, operation: &'static str) -> Self {
        Error::UnsupportedType {
            type_name: type_name.into(),
            operation,
        }
    }

    /// Create an [`Error::ValueRejected`].
    pub fn rejected(
        name: impl Into<String>,
        requirement: Requirement,
        type_name: impl Into<String>,
    ) -> Self {
        Error::ValueRejected {
            name: name.into(),
            requirement,
            type_name: type_name.into(),
        }
    }

    /// Returns true if this is an [`Error::UnsupportedType`].
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, Error::UnsupportedType { .. })
    }

    /// Returns true if this is an [`Error::ValueRejected`].
    pub fn is_value_rejected(&self) -> bool {
        matches!(self, Error::ValueRejected { .. })
    }

    /// The failed requirement, if this is a rejection.
    pub fn requirement(&self) -> Option<&Requirement> {
        match self {
            Error::ValueRejected { requirement, .. } => Some(requirement),
            Error::UnsupportedType { .. } => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedType {
                type_name,
                operation,
            } => write!(f, "{} does not support type {}", operation, type_name),
            Error::ValueRejected {
                name,
                requirement,
                type_name,
            } => write!(f, "{} {} (got {})", name, requirement, type_name),
        }
    }
}

impl std::error::Error for Error {}

/// What a `require_*` wrapper demanded of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Must not be empty.
    NotEmpty,
    /// Must be usable as a string.
    Stringy,
    /// Must be iterable.
    Traversable,
    /// Must support index access.
    Indexable,
    /// Must accept property or element assignment.
    Assignable,
    /// Must be invocable.
    Callable,
    /// Must be a number or numeric string.
    Numeric,
    /// Must have an integral value.
    Integery,
    /// Must be a boolean.
    Logical,
    /// Must name a registered class.
    DefinedClass,
    /// Must name a registered interface.
    DefinedInterface,
    /// Must name a registered class or interface.
    DefinedObjectType,
    /// Must be an object of the given type.
    ObjectOfType(String),
    /// Must be compatible with the given type.
    CompatibleWith(String),
    /// Must not appear in a blacklist.
    NotBlacklisted,
    /// Caller-defined requirement.
    Custom(String),
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::NotEmpty => write!(f, "must not be empty"),
            Requirement::Stringy => write!(f, "must be stringy"),
            Requirement::Traversable => write!(f, "must be traversable"),
            Requirement::Indexable => write!(f, "must be indexable"),
            Requirement::Assignable => write!(f, "must be assignable"),
            Requirement::Callable => write!(f, "must be callable"),
            Requirement::Numeric => write!(f, "must be numeric"),
            Requirement::Integery => write!(f, "must be integery"),
            Requirement::Logical => write!(f, "must be a boolean"),
            Requirement::DefinedClass => write!(f, "must name a defined class"),
            Requirement::DefinedInterface => write!(f, "must name a defined interface"),
            Requirement::DefinedObjectType => {
                write!(f, "must name a defined class or interface")
            }
            Requirement::ObjectOfType(ty) => write!(f, "must be an object of type {}", ty),
            Requirement::CompatibleWith(ty) => write!(f, "must be compatible with {}", ty),
            Requirement::NotBlacklisted => write!(f, "must not be blacklisted"),
            Requirement::Custom(msg) => f.write_str(msg),
        }
    }
}

/// Problems found while building a [`ClassRegistry`](crate::ClassRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two declarations share a name.
    Duplicate(String),
    /// A class extends a class that was never declared.
    UnknownParent {
        /// The declaring class.
        class: String,
        /// The missing parent.
        parent: String,
    },
    /// A declaration lists an interface that was never declared.
    UnknownInterface {
        /// The declaring class or interface.
        class: String,
        /// The missing interface.
        interface: String,
    },
    /// A class extends an interface.
    ParentNotAClass {
        /// The declaring class.
        class: String,
        /// The interface named as parent.
        parent: String,
    },
    /// A declaration implements or extends a class as if it were an interface.
    NotAnInterface {
        /// The declaring class or interface.
        class: String,
        /// The class named as interface.
        name: String,
    },
    /// A class is its own ancestor, or an interface extends itself.
    InheritanceCycle(String),
    /// A declaration uses a name reserved for a structural type label
    /// (`Null`, `String`, `Callable`, ...) or the fallback label.
    ReservedName(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Duplicate(name) => write!(f, "{} is declared more than once", name),
            RegistryError::UnknownParent { class, parent } => {
                write!(f, "{} extends unknown class {}", class, parent)
            }
            RegistryError::UnknownInterface { class, interface } => {
                write!(f, "{} implements unknown interface {}", class, interface)
            }
            RegistryError::ParentNotAClass { class, parent } => {
                write!(f, "{} extends {}, which is an interface", class, parent)
            }
            RegistryError::NotAnInterface { class, name } => {
                write!(f, "{} implements {}, which is a class", class, name)
            }
            RegistryError::InheritanceCycle(name) => {
                write!(f, "inheritance cycle through {}", name)
            }
            RegistryError::ReservedName(name) => {
                write!(f, "{} is a reserved type label", name)
            }
        }
    }
}

impl std::error::Error for RegistryError {}
