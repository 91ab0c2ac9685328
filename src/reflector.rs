//! Type ranking
//!
//! A [`Reflector`] answers "which types could this value be treated as?"
//! with a rank list: every matching [`TypeLabel`], most specific first,
//! ending in the fallback label.
//!
//! | value                         | rank list                                                   |
//! |-------------------------------|-------------------------------------------------------------|
//! | `null`                        | `Null, Mixed`                                               |
//! | `true`, `1`, `1.5`            | `Boolean` / `Integer` / `Double`, `Mixed`                   |
//! | `"text"`                      | `String, Mixed`                                             |
//! | `"strlen"` (a function)       | `Callable, String, Mixed`                                   |
//! | `"Foo"` (a class)             | `Foo, <ancestors>, <interfaces>, Class, String, Mixed`      |
//! | `"Bar"` (an interface)        | `Bar, <parent interfaces>, Interface, String, Mixed`        |
//! | `[...]`                       | `Array, Mixed` (`Callable` first for callable pairs)        |
//! | instance of `Foo`             | `Foo, <ancestors>, <interfaces>, Object, String?, Callable?, Mixed` |
//!
//! Rank lists for objects and class names are cached per class.
//!
//! # Example
//!
//! ```rust
//! use duckcheck::{ClassDef, ClassRegistry, Object, Reflector, Value};
//!
//! let registry = ClassRegistry::builder()
//!     .declare(ClassDef::class("Base").implements("Countable"))
//!     .declare(ClassDef::class("Child").extends("Base"))
//!     .build()
//!     .unwrap();
//! let cx = Reflector::new(registry);
//!
//! let ranks = cx.ranks(&Value::from(Object::new("Child")));
//! assert_eq!(&*ranks, ["Child", "Base", "Countable", "Object", "Mixed"]);
//! ```

use std::sync::Arc;

use crate::cache::{CacheKey, TypeCache};
use crate::class::{Capability, ClassKind, ClassRegistry};
use crate::error::RegistryError;
use crate::label::TypeLabel;
use crate::value::Value;

/// An ordered list of type labels, most specific first.
pub type RankList = Arc<[TypeLabel]>;

/// Knobs for a [`Reflector`].
///
/// # Example
///
/// ```rust
/// use duckcheck::{ReflectorConfig, TypeLabel};
///
/// let config = ReflectorConfig::default()
///     .with_fallback(TypeLabel::from_static("EverythingElse"))
///     .with_caching(false);
///
/// assert_eq!(config.fallback(), "EverythingElse");
/// assert!(!config.caching());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectorConfig {
    fallback: TypeLabel,
    caching: bool,
}

impl ReflectorConfig {
    /// Use `label` as the universal last entry of every rank list.
    pub fn with_fallback(mut self, label: TypeLabel) -> Self {
        self.fallback = label;
        self
    }

    /// Turn the rank-list cache on or off.
    pub fn with_caching(mut self, caching: bool) -> Self {
        self.caching = caching;
        self
    }

    /// The fallback label.
    pub fn fallback(&self) -> &TypeLabel {
        &self.fallback
    }

    /// Whether rank lists are cached.
    pub fn caching(&self) -> bool {
        self.caching
    }
}

impl Default for ReflectorConfig {
    fn default() -> Self {
        ReflectorConfig {
            fallback: TypeLabel::MIXED,
            caching: true,
        }
    }
}

/// Introspection context: a class registry plus the rank-list cache.
///
/// Construct one per process (or per test) and pass it by reference to
/// everything that inspects values.
#[derive(Debug)]
pub struct Reflector {
    registry: ClassRegistry,
    config: ReflectorConfig,
    cache: TypeCache<RankList>,
}

impl Reflector {
    /// Create a reflector with the default configuration.
    pub fn new(registry: ClassRegistry) -> Self {
        Self::from_parts(registry, ReflectorConfig::default())
    }

    /// Create a reflector with a custom configuration.
    ///
    /// Fails if the fallback label names a declared class or interface.
    ///
    /// ```rust
    /// use duckcheck::{ClassDef, ClassRegistry, Reflector, ReflectorConfig, RegistryError, TypeLabel};
    ///
    /// let registry = ClassRegistry::builder()
    ///     .declare(ClassDef::class("Any"))
    ///     .build()
    ///     .unwrap();
    /// let config = ReflectorConfig::default().with_fallback(TypeLabel::from_static("Any"));
    ///
    /// let err = Reflector::with_config(registry, config).unwrap_err();
    /// assert_eq!(err, RegistryError::ReservedName("Any".into()));
    /// ```
    pub fn with_config(
        registry: ClassRegistry,
        config: ReflectorConfig,
    ) -> Result<Self, RegistryError> {
        if registry.class(config.fallback.as_str()).is_some() {
            return Err(RegistryError::ReservedName(config.fallback.to_string()));
        }
        Ok(Self::from_parts(registry, config))
    }

    fn from_parts(registry: ClassRegistry, config: ReflectorConfig) -> Self {
        Reflector {
            registry,
            config,
            cache: TypeCache::new(),
        }
    }

    /// The declared classes, interfaces and functions.
    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    /// The active configuration.
    pub fn config(&self) -> &ReflectorConfig {
        &self.config
    }

    /// The fallback label that ends every rank list.
    pub fn fallback(&self) -> &TypeLabel {
        &self.config.fallback
    }

    /// The rank-list cache.
    pub fn cache(&self) -> &TypeCache<RankList> {
        &self.cache
    }

    /// Forget every cached rank list.
    pub fn reset_cache(&self) {
        self.cache.reset();
    }

    /// The key rank lists for `value` are cached under, if they are cached
    /// at all. Only objects and strings naming a class or interface are.
    pub fn cache_key(&self, value: &Value) -> Option<CacheKey> {
        if !self.config.caching {
            return None;
        }
        match value {
            Value::Object(object) => Some(CacheKey::Object(object.class().to_string())),
            Value::Str(name) if self.registry.class(name).is_some() => {
                Some(CacheKey::ClassName(name.clone()))
            }
            _ => None,
        }
    }

    /// Every type `value` can be treated as, most specific first.
    ///
    /// The fallback label is always last and never appears earlier; no
    /// label appears twice.
    pub fn ranks(&self, value: &Value) -> RankList {
        match self.cache_key(value) {
            Some(key) => self
                .cache
                .get_or_insert_with(&key, || self.compute_ranks(value)),
            None => self.compute_ranks(value),
        }
    }

    /// Returns true if `label` is in the rank list of `value`.
    pub fn matches(&self, value: &Value, label: &str) -> bool {
        self.ranks(value).iter().any(|l| l == label)
    }

    /// Returns true if `items` is an invocable `[target, method]` pair: an
    /// object or a class name, followed by a method that class has.
    pub fn is_callable_pair(&self, items: &[Value]) -> bool {
        let [target, Value::Str(method)] = items else {
            return false;
        };
        let class = match target {
            Value::Object(object) => object.class(),
            Value::Str(name) if self.registry.is_class(name) => name.as_str(),
            _ => return false,
        };
        self.registry.has_method(class, method)
    }

    /// Returns true if `name` is a registered function or a
    /// `Class::method` reference to an existing method.
    pub fn is_callable_name(&self, name: &str) -> bool {
        if self.registry.is_function(name) {
            return true;
        }
        match name.split_once("::") {
            Some((class, method)) => {
                self.registry.is_class(class) && self.registry.has_method(class, method)
            }
            None => false,
        }
    }

    fn compute_ranks(&self, value: &Value) -> RankList {
        let mut labels = Vec::new();
        match value {
            Value::Null => labels.push(TypeLabel::NULL),
            Value::Bool(_) => labels.push(TypeLabel::BOOLEAN),
            Value::Int(_) => labels.push(TypeLabel::INTEGER),
            Value::Float(_) => labels.push(TypeLabel::DOUBLE),
            Value::Str(s) => {
                match self.registry.kind_of(s) {
                    Some(kind) => {
                        self.push_hierarchy(&mut labels, s);
                        labels.push(match kind {
                            ClassKind::Class => TypeLabel::CLASS,
                            ClassKind::Interface => TypeLabel::INTERFACE,
                        });
                    }
                    None if self.is_callable_name(s) => labels.push(TypeLabel::CALLABLE),
                    None => {}
                }
                labels.push(TypeLabel::STRING);
            }
            Value::Array(items) => {
                if self.is_callable_pair(items) {
                    labels.push(TypeLabel::CALLABLE);
                }
                labels.push(TypeLabel::ARRAY);
            }
            Value::Object(object) => {
                let class = object.class();
                self.push_hierarchy(&mut labels, class);
                labels.push(TypeLabel::OBJECT);
                if self.registry.has_capability(class, Capability::Stringable) {
                    labels.push(TypeLabel::STRING);
                }
                if self.registry.has_capability(class, Capability::Invocable) {
                    labels.push(TypeLabel::CALLABLE);
                }
            }
        }
        self.finish(labels)
    }

    fn push_hierarchy(&self, labels: &mut Vec<TypeLabel>, name: &str) {
        // Structural labels only come from the value itself. Such names can
        // never be declared, but an object may still carry one as its class.
        if !TypeLabel::is_structural(name) {
            labels.push(TypeLabel::new(name));
        }
        let registry = &self.registry;
        labels.extend(registry.ancestors(name).iter().cloned().map(TypeLabel::new));
        labels.extend(registry.interfaces(name).iter().cloned().map(TypeLabel::new));
    }

    fn finish(&self, labels: Vec<TypeLabel>) -> RankList {
        let fallback = &self.config.fallback;
        let mut ranked: Vec<TypeLabel> = Vec::with_capacity(labels.len() + 1);
        for label in labels {
            if label != *fallback && !ranked.contains(&label) {
                ranked.push(label);
            }
        }
        ranked.push(fallback.clone());
        ranked.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::ClassDef;
    use crate::value::Object;

    fn reflector() -> Reflector {
        let registry = ClassRegistry::builder()
            .declare(ClassDef::interface("Shape"))
            .declare(ClassDef::class("Base").implements("Shape").method("describe"))
            .declare(
                ClassDef::class("Named")
                    .extends("Base")
                    .implements("IteratorAggregate")
                    .capability(Capability::Stringable),
            )
            .declare(ClassDef::class("Handler").capability(Capability::Invocable))
            .function("strlen")
            .build()
            .unwrap();
        Reflector::new(registry)
    }

    fn labels(ranks: &RankList) -> Vec<&str> {
        ranks.iter().map(TypeLabel::as_str).collect()
    }

    #[test]
    fn test_scalars() {
        let cx = reflector();
        assert_eq!(labels(&cx.ranks(&Value::Null)), ["Null", "Mixed"]);
        assert_eq!(labels(&cx.ranks(&Value::from(true))), ["Boolean", "Mixed"]);
        assert_eq!(labels(&cx.ranks(&Value::from(3))), ["Integer", "Mixed"]);
        assert_eq!(labels(&cx.ranks(&Value::from(3.5))), ["Double", "Mixed"]);
        assert_eq!(labels(&cx.ranks(&Value::from("hi"))), ["String", "Mixed"]);
    }

    #[test]
    fn test_function_names_are_callable() {
        let cx = reflector();
        assert_eq!(
            labels(&cx.ranks(&Value::from("strlen"))),
            ["Callable", "String", "Mixed"]
        );
        assert_eq!(
            labels(&cx.ranks(&Value::from("Base::describe"))),
            ["Callable", "String", "Mixed"]
        );
        assert_eq!(
            labels(&cx.ranks(&Value::from("Base::missing"))),
            ["String", "Mixed"]
        );
    }

    #[test]
    fn test_object_ranks() {
        let cx = reflector();
        let ranks = cx.ranks(&Value::from(Object::new("Named")));
        assert_eq!(
            labels(&ranks),
            [
                "Named",
                "Base",
                "IteratorAggregate",
                "Traversable",
                "Shape",
                "Object",
                "String",
                "Mixed"
            ]
        );

        let ranks = cx.ranks(&Value::from(Object::new("Handler")));
        assert_eq!(labels(&ranks), ["Handler", "Object", "Callable", "Mixed"]);
    }

    #[test]
    fn test_unregistered_object() {
        let cx = reflector();
        let ranks = cx.ranks(&Value::from(Object::new("Ghost")));
        assert_eq!(labels(&ranks), ["Ghost", "Object", "Mixed"]);
    }

    #[test]
    fn test_class_and_interface_names() {
        let cx = reflector();
        assert_eq!(
            labels(&cx.ranks(&Value::from("Named"))),
            [
                "Named",
                "Base",
                "IteratorAggregate",
                "Traversable",
                "Shape",
                "Class",
                "String",
                "Mixed"
            ]
        );
        assert_eq!(
            labels(&cx.ranks(&Value::from("Iterator"))),
            ["Iterator", "Traversable", "Interface", "String", "Mixed"]
        );
    }

    #[test]
    fn test_callable_pairs() {
        let cx = reflector();
        let pair = Value::from(vec![Value::from(Object::new("Named")), Value::from("describe")]);
        assert_eq!(labels(&cx.ranks(&pair)), ["Callable", "Array", "Mixed"]);

        let static_pair = Value::from(vec!["Base", "describe"]);
        assert!(cx.matches(&static_pair, "Callable"));

        let not_a_method = Value::from(vec!["Base", "nope"]);
        assert_eq!(labels(&cx.ranks(&not_a_method)), ["Array", "Mixed"]);

        let too_long = Value::from(vec!["Base", "describe", "extra"]);
        assert!(!cx.matches(&too_long, "Callable"));
    }

    #[test]
    fn test_objects_and_class_names_are_cached() {
        let cx = reflector();
        cx.ranks(&Value::from("plain string"));
        cx.ranks(&Value::from(7));
        assert!(cx.cache().is_empty());

        let first = cx.ranks(&Value::from(Object::new("Named")));
        cx.ranks(&Value::from("Named"));
        assert_eq!(cx.cache().len(), 2);

        let second = cx.ranks(&Value::from(Object::new("Named").with_property("x", 1)));
        assert!(Arc::ptr_eq(&first, &second));

        cx.reset_cache();
        assert!(cx.cache().is_empty());
        assert_eq!(cx.ranks(&Value::from(Object::new("Named"))), first);
    }

    #[test]
    fn test_caching_can_be_disabled() {
        let registry = ClassRegistry::default();
        let cx = Reflector::with_config(registry, ReflectorConfig::default().with_caching(false))
            .unwrap();
        cx.ranks(&Value::from(Object::new("Anything")));
        assert!(cx.cache().is_empty());
        assert!(cx.cache_key(&Value::from(Object::new("Anything"))).is_none());
    }

    #[test]
    fn test_custom_fallback_is_last_and_unique() {
        let registry = ClassRegistry::default();
        let config = ReflectorConfig::default().with_fallback(TypeLabel::STRING);
        let cx = Reflector::with_config(registry, config).unwrap();
        assert_eq!(labels(&cx.ranks(&Value::from("x"))), ["String"]);
        assert_eq!(labels(&cx.ranks(&Value::Null)), ["Null", "String"]);
    }

    #[test]
    fn test_fallback_cannot_name_a_declared_type() {
        let config = ReflectorConfig::default().with_fallback(TypeLabel::TRAVERSABLE);
        let err = Reflector::with_config(ClassRegistry::default(), config).unwrap_err();
        assert_eq!(err, RegistryError::ReservedName("Traversable".into()));
    }

    #[test]
    fn test_structural_class_names_do_not_leak_into_ranks() {
        let cx = reflector();
        for class in ["Null", "Callable", "String", "Mixed"] {
            let object = Value::from(Object::new(class).with_property("x", 1));
            assert_eq!(labels(&cx.ranks(&object)), ["Object", "Mixed"], "{class}");
        }
        assert_eq!(labels(&cx.ranks(&Value::from("Null"))), ["String", "Mixed"]);
        assert!(!cx.matches(&Value::from("Callable"), "Callable"));
    }
}
