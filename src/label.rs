//! Type labels
//!
//! A [`TypeLabel`] is the tag for one of the types a value can be treated
//! as: a primitive kind, a class or interface name, a structural capability
//! such as `Callable`, or the universal fallback.

use std::borrow::{Borrow, Cow};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A string tag naming a type.
///
/// Well-known labels are available as associated constants and cost nothing
/// to construct.
///
/// # Example
///
/// ```rust
/// use duckcheck::TypeLabel;
///
/// let label = TypeLabel::new("App\\User");
/// assert_eq!(label.as_str(), "App\\User");
/// assert_eq!(TypeLabel::MIXED, "Mixed");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TypeLabel(Cow<'static, str>);

impl TypeLabel {
    /// `null`.
    pub const NULL: TypeLabel = TypeLabel::from_static("Null");
    /// Booleans.
    pub const BOOLEAN: TypeLabel = TypeLabel::from_static("Boolean");
    /// Integers.
    pub const INTEGER: TypeLabel = TypeLabel::from_static("Integer");
    /// Floating point numbers.
    pub const DOUBLE: TypeLabel = TypeLabel::from_static("Double");
    /// Strings, and anything that converts to one implicitly.
    pub const STRING: TypeLabel = TypeLabel::from_static("String");
    /// Arrays.
    pub const ARRAY: TypeLabel = TypeLabel::from_static("Array");
    /// Any object.
    pub const OBJECT: TypeLabel = TypeLabel::from_static("Object");
    /// A string naming a class.
    pub const CLASS: TypeLabel = TypeLabel::from_static("Class");
    /// A string naming an interface.
    pub const INTERFACE: TypeLabel = TypeLabel::from_static("Interface");
    /// Anything that can be invoked.
    pub const CALLABLE: TypeLabel = TypeLabel::from_static("Callable");
    /// The built-in iteration interface.
    pub const TRAVERSABLE: TypeLabel = TypeLabel::from_static("Traversable");
    /// Default fallback; matches every value.
    pub const MIXED: TypeLabel = TypeLabel::from_static("Mixed");

    /// Labels that come from a value's shape or capabilities, plus the
    /// default fallback. No class or interface may be named after one.
    pub const STRUCTURAL: [TypeLabel; 11] = [
        Self::NULL,
        Self::BOOLEAN,
        Self::INTEGER,
        Self::DOUBLE,
        Self::STRING,
        Self::ARRAY,
        Self::OBJECT,
        Self::CLASS,
        Self::INTERFACE,
        Self::CALLABLE,
        Self::MIXED,
    ];

    /// Returns true if `name` is one of [`TypeLabel::STRUCTURAL`].
    ///
    /// ```rust
    /// use duckcheck::TypeLabel;
    ///
    /// assert!(TypeLabel::is_structural("Callable"));
    /// assert!(!TypeLabel::is_structural("Traversable"));
    /// ```
    pub fn is_structural(name: &str) -> bool {
        Self::STRUCTURAL.iter().any(|label| label == name)
    }

    /// Create a label from a `'static` string without allocating.
    pub const fn from_static(label: &'static str) -> Self {
        TypeLabel(Cow::Borrowed(label))
    }

    /// Create a label.
    pub fn new(label: impl Into<String>) -> Self {
        TypeLabel(Cow::Owned(label.into()))
    }

    /// The label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last segment of a namespaced label (`App\Model\User` -> `User`).
    ///
    /// # Example
    ///
    /// ```rust
    /// use duckcheck::TypeLabel;
    ///
    /// assert_eq!(TypeLabel::new("App\\Model\\User").short_name(), "User");
    /// assert_eq!(TypeLabel::new("app::User").short_name(), "User");
    /// assert_eq!(TypeLabel::STRING.short_name(), "String");
    /// ```
    pub fn short_name(&self) -> &str {
        let s = self.as_str();
        let after_backslash = s.rsplit('\\').next().unwrap_or(s);
        after_backslash.rsplit("::").next().unwrap_or(after_backslash)
    }
}

impl fmt::Display for TypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TypeLabel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TypeLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TypeLabel {
    fn from(label: &'static str) -> Self {
        TypeLabel::from_static(label)
    }
}

impl From<String> for TypeLabel {
    fn from(label: String) -> Self {
        TypeLabel::new(label)
    }
}

impl PartialEq<str> for TypeLabel {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for TypeLabel {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
