//! Dynamic values
//!
//! [`Value`] is the tagged representation of anything the host language can
//! hand us. Objects carry the name of their class; everything the library
//! knows about that class lives in the [`ClassRegistry`](crate::ClassRegistry).
//!
//! # Example
//!
//! ```rust
//! use duckcheck::{Object, Value};
//!
//! let user = Object::new("App\\User").with_property("name", "alice");
//! let value = Value::from(user);
//!
//! assert_eq!(value.simple_type(), "Object");
//! assert_eq!(value.class_name(), Some("App\\User"));
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A value of the dynamically typed host language.
///
/// Values are owned trees: an array or object owns its children, so a value
/// can never contain itself.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// The absence of a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string. May also name a class, interface or function.
    Str(String),
    /// An ordered list of values.
    Array(Vec<Value>),
    /// An instance of a class.
    Object(Object),
}

impl Value {
    /// Name of the primitive kind of this value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use duckcheck::Value;
    ///
    /// assert_eq!(Value::Null.simple_type(), "Null");
    /// assert_eq!(Value::from(1.5).simple_type(), "Double");
    /// assert_eq!(Value::from(vec![Value::from(1)]).simple_type(), "Array");
    /// ```
    pub fn simple_type(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Int(_) => "Integer",
            Value::Float(_) => "Double",
            Value::Str(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    /// Human readable type description used in error messages.
    ///
    /// Objects report their class name, everything else its simple type.
    pub fn type_description(&self) -> String {
        match self {
            Value::Object(object) => format!("object<{}>", object.class()),
            other => other.simple_type().to_string(),
        }
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The object, if this is an object.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// The elements, if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The class name, if this is an object.
    pub fn class_name(&self) -> Option<&str> {
        self.as_object().map(Object::class)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Object(object) => write!(f, "{}", object),
        }
    }
}

/// An instance of a class, with its properties in declaration order.
///
/// When the class implements `Traversable`, iterating the object yields the
/// property values in order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Object {
    class: String,
    properties: Vec<(String, Value)>,
}

impl Object {
    /// Create an instance of `class` with no properties.
    pub fn new(class: impl Into<String>) -> Self {
        Object {
            class: class.into(),
            properties: Vec::new(),
        }
    }

    /// Add or replace a property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Add or replace a property in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.properties.push((name, value)),
        }
    }

    /// The class this object is an instance of.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Look up a property by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Property values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.properties.iter().map(|(_, v)| v)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if the object has no properties.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.class)?;
        for (i, (name, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}: {}", name, value)?;
        }
        if !self.properties.is_empty() {
            write!(f, " ")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_type_covers_every_kind() {
        assert_eq!(Value::Null.simple_type(), "Null");
        assert_eq!(Value::from(true).simple_type(), "Boolean");
        assert_eq!(Value::from(3).simple_type(), "Integer");
        assert_eq!(Value::from(0.5).simple_type(), "Double");
        assert_eq!(Value::from("x").simple_type(), "String");
        assert_eq!(Value::Array(vec![]).simple_type(), "Array");
        assert_eq!(Value::from(Object::new("Foo")).simple_type(), "Object");
    }

    #[test]
    fn test_type_description_names_class() {
        let value = Value::from(Object::new("Foo"));
        assert_eq!(value.type_description(), "object<Foo>");
        assert_eq!(Value::from(1).type_description(), "Integer");
    }

    #[test]
    fn test_object_set_replaces_existing_property() {
        let mut object = Object::new("Foo").with_property("a", 1);
        object.set("a", 2);
        object.set("b", 3);

        assert_eq!(object.len(), 2);
        assert_eq!(object.get("a"), Some(&Value::Int(2)));
        assert_eq!(object.values().cloned().collect::<Vec<_>>(), vec![Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn test_option_converts_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn test_display() {
        let value = Value::from(vec![Value::from(1), Value::from("a"), Value::Null]);
        assert_eq!(value.to_string(), r#"[1, "a", null]"#);

        let object = Object::new("Point").with_property("x", 1).with_property("y", 2);
        assert_eq!(object.to_string(), "Point { x: 1, y: 2 }");
        assert_eq!(Object::new("Empty").to_string(), "Empty {}");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_of_nested_value() {
        let value = Value::from(vec![
            Value::from(Object::new("Foo").with_property("tags", vec!["a", "b"])),
            Value::Null,
        ]);
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
