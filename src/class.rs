//! Declared class hierarchies
//!
//! Instead of discovering ancestors, interfaces and magic methods at runtime,
//! every class and interface is declared up front through a
//! [`RegistryBuilder`]. Building the registry validates the hierarchy and
//! flattens it, so later queries are plain lookups.
//!
//! # Example
//!
//! ```rust
//! use duckcheck::{Capability, ClassDef, ClassRegistry};
//!
//! let registry = ClassRegistry::builder()
//!     .declare(ClassDef::interface("Shape"))
//!     .declare(ClassDef::class("Rect").implements("Shape").method("area"))
//!     .declare(
//!         ClassDef::class("Square")
//!             .extends("Rect")
//!             .capability(Capability::Stringable),
//!     )
//!     .function("strlen")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.ancestors("Square"), ["Rect"]);
//! assert_eq!(registry.interfaces("Square"), ["Shape"]);
//! assert!(registry.has_method("Square", "area"));
//! assert!(registry.has_capability("Square", Capability::Stringable));
//! assert!(registry.is_function("strlen"));
//! ```

use std::collections::{HashMap, HashSet};

use crate::error::RegistryError;
use crate::label::TypeLabel;

/// Interfaces that every registry knows about.
///
/// `Iterator` and `IteratorAggregate` extend `Traversable`.
pub const BUILTIN_INTERFACES: [&str; 5] = [
    "Traversable",
    "Iterator",
    "IteratorAggregate",
    "ArrayAccess",
    "Countable",
];

/// Whether a declaration is a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// A concrete or abstract class.
    Class,
    /// An interface.
    Interface,
}

/// A structural capability a class opts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Instances convert to strings implicitly.
    Stringable,
    /// Instances can be called like functions.
    Invocable,
}

impl Capability {
    const fn bit(self) -> u8 {
        match self {
            Capability::Stringable => 0b01,
            Capability::Invocable => 0b10,
        }
    }
}

/// A set of [`Capability`] values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Capabilities(u8);

impl Capabilities {
    /// The empty set.
    pub const fn empty() -> Self {
        Capabilities(0)
    }

    /// Returns true if `capability` is in the set.
    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    /// Add a capability.
    pub fn insert(&mut self, capability: Capability) {
        self.0 |= capability.bit();
    }

    /// Union of two sets.
    pub const fn union(self, other: Capabilities) -> Self {
        Capabilities(self.0 | other.0)
    }
}

/// Declaration of a single class or interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    name: String,
    kind: ClassKind,
    parent: Option<String>,
    interfaces: Vec<String>,
    methods: HashSet<String>,
    capabilities: Capabilities,
}

impl ClassDef {
    /// Declare a class.
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, ClassKind::Class)
    }

    /// Declare an interface.
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, ClassKind::Interface)
    }

    fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        ClassDef {
            name: name.into(),
            kind,
            parent: None,
            interfaces: Vec::new(),
            methods: HashSet::new(),
            capabilities: Capabilities::empty(),
        }
    }

    /// Set the parent.
    ///
    /// For an interface this adds a parent interface instead; interfaces may
    /// extend several.
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        match self.kind {
            ClassKind::Class => self.parent = Some(parent.into()),
            ClassKind::Interface => self.interfaces.push(parent.into()),
        }
        self
    }

    /// Implement an interface.
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Declare a method.
    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.methods.insert(name.into());
        self
    }

    /// Opt into a capability.
    pub fn capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    /// The declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class or interface.
    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    /// The declared parent class, if any.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

/// A declaration together with its flattened hierarchy.
#[derive(Debug, Clone)]
pub struct ClassInfo {
    def: ClassDef,
    ancestors: Vec<String>,
    interfaces: Vec<String>,
    methods: HashSet<String>,
    capabilities: Capabilities,
}

impl ClassInfo {
    /// The declared name.
    pub fn name(&self) -> &str {
        self.def.name()
    }

    /// Class or interface.
    pub fn kind(&self) -> ClassKind {
        self.def.kind()
    }

    /// Ancestor classes, nearest first. Always empty for interfaces.
    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    /// Every interface implemented or extended, directly or through
    /// ancestors. An interface's own name is not included.
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Returns true if the class or one of its ancestors declares `method`.
    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    /// Capabilities declared by the class or inherited.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

/// Immutable, validated set of class, interface and function declarations.
#[derive(Debug, Clone)]
pub struct ClassRegistry {
    classes: HashMap<String, ClassInfo>,
    functions: HashSet<String>,
}

impl ClassRegistry {
    /// Start declaring a registry. Built-in interfaces are pre-declared.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Look up a class or interface.
    pub fn class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    /// Returns true if `name` is a declared class.
    pub fn is_class(&self, name: &str) -> bool {
        self.kind_of(name) == Some(ClassKind::Class)
    }

    /// Returns true if `name` is a declared interface.
    pub fn is_interface(&self, name: &str) -> bool {
        self.kind_of(name) == Some(ClassKind::Interface)
    }

    /// Class or interface, if `name` is declared.
    pub fn kind_of(&self, name: &str) -> Option<ClassKind> {
        self.class(name).map(ClassInfo::kind)
    }

    /// Ancestor classes, nearest first. Empty for unknown names.
    pub fn ancestors(&self, name: &str) -> &[String] {
        self.class(name).map(ClassInfo::ancestors).unwrap_or(&[])
    }

    /// Interfaces implemented or extended. Empty for unknown names.
    pub fn interfaces(&self, name: &str) -> &[String] {
        self.class(name).map(ClassInfo::interfaces).unwrap_or(&[])
    }

    /// Returns true if the class has `capability`, directly or inherited.
    pub fn has_capability(&self, name: &str, capability: Capability) -> bool {
        self.class(name)
            .is_some_and(|info| info.capabilities().contains(capability))
    }

    /// Returns true if the class declares or inherits `method`.
    pub fn has_method(&self, name: &str, method: &str) -> bool {
        self.class(name).is_some_and(|info| info.has_method(method))
    }

    /// Returns true if `name` is `target` or has it as ancestor or interface.
    pub fn is_subtype_of(&self, name: &str, target: &str) -> bool {
        name == target
            || self.class(name).is_some_and(|info| {
                info.ancestors().iter().any(|a| a == target)
                    || info.interfaces().iter().any(|i| i == target)
            })
    }

    /// Returns true if `name` is a registered function.
    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    /// Number of classes and interfaces, built-ins included.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Always false: built-in interfaces are always present.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        // Built-ins alone always form a valid hierarchy.
        RegistryBuilder::default()
            .build()
            .unwrap_or_else(|_| ClassRegistry {
                classes: HashMap::new(),
                functions: HashSet::new(),
            })
    }
}

/// Collects declarations for a [`ClassRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    defs: Vec<ClassDef>,
    functions: HashSet<String>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        let defs = vec![
            ClassDef::interface("Traversable"),
            ClassDef::interface("Iterator").extends("Traversable"),
            ClassDef::interface("IteratorAggregate").extends("Traversable"),
            ClassDef::interface("ArrayAccess"),
            ClassDef::interface("Countable"),
        ];
        RegistryBuilder {
            defs,
            functions: HashSet::new(),
        }
    }
}

impl RegistryBuilder {
    /// Add a class or interface.
    pub fn declare(mut self, def: ClassDef) -> Self {
        self.defs.push(def);
        self
    }

    /// Register a free function name.
    pub fn function(mut self, name: impl Into<String>) -> Self {
        self.functions.insert(name.into());
        self
    }

    /// Validate the declarations and flatten every hierarchy.
    pub fn build(self) -> Result<ClassRegistry, RegistryError> {
        let mut defs: HashMap<String, ClassDef> = HashMap::with_capacity(self.defs.len());
        let mut order = Vec::with_capacity(self.defs.len());
        for def in self.defs {
            if TypeLabel::is_structural(def.name()) {
                return Err(RegistryError::ReservedName(def.name.clone()));
            }
            if defs.contains_key(def.name()) {
                return Err(RegistryError::Duplicate(def.name.clone()));
            }
            order.push(def.name.clone());
            defs.insert(def.name.clone(), def);
        }

        for def in defs.values() {
            check_references(def, &defs)?;
        }

        let mut classes = HashMap::with_capacity(defs.len());
        for name in &order {
            let info = flatten(name, &defs)?;
            classes.insert(name.clone(), info);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            classes = classes.len(),
            functions = self.functions.len(),
            "class registry built"
        );

        Ok(ClassRegistry {
            classes,
            functions: self.functions,
        })
    }
}

fn check_references(
    def: &ClassDef,
    defs: &HashMap<String, ClassDef>,
) -> Result<(), RegistryError> {
    if let Some(parent) = def.parent() {
        match defs.get(parent).map(ClassDef::kind) {
            None => {
                return Err(RegistryError::UnknownParent {
                    class: def.name.clone(),
                    parent: parent.to_string(),
                })
            }
            Some(ClassKind::Interface) => {
                return Err(RegistryError::ParentNotAClass {
                    class: def.name.clone(),
                    parent: parent.to_string(),
                })
            }
            Some(ClassKind::Class) => {}
        }
    }
    for interface in &def.interfaces {
        match defs.get(interface).map(ClassDef::kind) {
            None => {
                return Err(RegistryError::UnknownInterface {
                    class: def.name.clone(),
                    interface: interface.clone(),
                })
            }
            Some(ClassKind::Class) => {
                return Err(RegistryError::NotAnInterface {
                    class: def.name.clone(),
                    name: interface.clone(),
                })
            }
            Some(ClassKind::Interface) => {}
        }
    }
    Ok(())
}

fn flatten(name: &str, defs: &HashMap<String, ClassDef>) -> Result<ClassInfo, RegistryError> {
    let def = &defs[name];

    // Parent chain, nearest first.
    let mut ancestors = Vec::new();
    let mut seen = HashSet::from([name]);
    let mut current = def.parent();
    while let Some(parent) = current {
        if !seen.insert(parent) {
            return Err(RegistryError::InheritanceCycle(name.to_string()));
        }
        ancestors.push(parent.to_string());
        current = defs[parent].parent();
    }

    let mut interfaces = Vec::new();
    let mut stack = Vec::new();
    for class in std::iter::once(name).chain(ancestors.iter().map(String::as_str)) {
        for interface in &defs[class].interfaces {
            collect_interfaces(interface, defs, &mut interfaces, &mut stack)?;
        }
    }
    if interfaces.iter().any(|i| i == name) {
        return Err(RegistryError::InheritanceCycle(name.to_string()));
    }

    let mut methods = def.methods.clone();
    let mut capabilities = def.capabilities;
    for ancestor in &ancestors {
        let parent = &defs[ancestor];
        methods.extend(parent.methods.iter().cloned());
        capabilities = capabilities.union(parent.capabilities);
    }

    Ok(ClassInfo {
        def: def.clone(),
        ancestors,
        interfaces,
        methods,
        capabilities,
    })
}

/// Depth-first: the interface, then whatever it extends. Duplicates keep
/// their first position; an interface already collected is not walked again.
fn collect_interfaces(
    name: &str,
    defs: &HashMap<String, ClassDef>,
    out: &mut Vec<String>,
    stack: &mut Vec<String>,
) -> Result<(), RegistryError> {
    if stack.iter().any(|s| s == name) {
        return Err(RegistryError::InheritanceCycle(name.to_string()));
    }
    if out.iter().any(|i| i == name) {
        return Ok(());
    }
    out.push(name.to_string());
    stack.push(name.to_string());
    for parent in &defs[name].interfaces {
        collect_interfaces(parent, defs, out, stack)?;
    }
    stack.pop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shapes() -> ClassRegistry {
        ClassRegistry::builder()
            .declare(ClassDef::interface("Shape"))
            .declare(ClassDef::interface("Polygon").extends("Shape"))
            .declare(
                ClassDef::class("Rect")
                    .implements("Polygon")
                    .implements("Countable")
                    .method("area"),
            )
            .declare(
                ClassDef::class("Square")
                    .extends("Rect")
                    .implements("ArrayAccess")
                    .method("side")
                    .capability(Capability::Stringable),
            )
            .declare(ClassDef::class("Cube").extends("Square"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builtins_are_declared() {
        let registry = ClassRegistry::default();
        for name in BUILTIN_INTERFACES {
            assert!(registry.is_interface(name), "{name} missing");
        }
        assert_eq!(registry.interfaces("Iterator"), ["Traversable"]);
        assert_eq!(registry.len(), BUILTIN_INTERFACES.len());
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let registry = shapes();
        assert_eq!(registry.ancestors("Cube"), ["Square", "Rect"]);
        assert!(registry.ancestors("Rect").is_empty());
        assert!(registry.ancestors("Unknown").is_empty());
    }

    #[test]
    fn test_interfaces_own_first_then_inherited() {
        let registry = shapes();
        assert_eq!(
            registry.interfaces("Square"),
            ["ArrayAccess", "Polygon", "Shape", "Countable"]
        );
        assert_eq!(registry.interfaces("Polygon"), ["Shape"]);
    }

    #[test]
    fn test_methods_and_capabilities_are_inherited() {
        let registry = shapes();
        assert!(registry.has_method("Cube", "area"));
        assert!(registry.has_method("Cube", "side"));
        assert!(!registry.has_method("Rect", "side"));
        assert!(registry.has_capability("Cube", Capability::Stringable));
        assert!(!registry.has_capability("Cube", Capability::Invocable));
        assert!(!registry.has_capability("Rect", Capability::Stringable));
    }

    #[test]
    fn test_is_subtype_of() {
        let registry = shapes();
        assert!(registry.is_subtype_of("Cube", "Cube"));
        assert!(registry.is_subtype_of("Cube", "Rect"));
        assert!(registry.is_subtype_of("Cube", "Shape"));
        assert!(!registry.is_subtype_of("Rect", "Square"));
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = ClassRegistry::builder()
            .declare(ClassDef::class("Traversable"))
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("Traversable".into()));
    }

    #[test]
    fn test_unknown_references_rejected() {
        let err = ClassRegistry::builder()
            .declare(ClassDef::class("A").extends("Missing"))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownParent { .. }));

        let err = ClassRegistry::builder()
            .declare(ClassDef::class("A").implements("Missing"))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownInterface { .. }));
    }

    #[test]
    fn test_kind_mismatches_rejected() {
        let err = ClassRegistry::builder()
            .declare(ClassDef::class("A").extends("Countable"))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::ParentNotAClass { .. }));

        let err = ClassRegistry::builder()
            .declare(ClassDef::class("A"))
            .declare(ClassDef::class("B").implements("A"))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotAnInterface { .. }));
    }

    #[test]
    fn test_cycles_rejected() {
        let err = ClassRegistry::builder()
            .declare(ClassDef::class("A").extends("B"))
            .declare(ClassDef::class("B").extends("A"))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::InheritanceCycle(_)));

        let err = ClassRegistry::builder()
            .declare(ClassDef::interface("I").extends("J"))
            .declare(ClassDef::interface("J").extends("I"))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::InheritanceCycle(_)));
    }

    #[test]
    fn test_structural_labels_cannot_be_declared() {
        for label in TypeLabel::STRUCTURAL {
            let err = ClassRegistry::builder()
                .declare(ClassDef::class(label.as_str()))
                .build()
                .unwrap_err();
            assert_eq!(err, RegistryError::ReservedName(label.to_string()));

            let err = ClassRegistry::builder()
                .declare(ClassDef::interface(label.as_str()))
                .build()
                .unwrap_err();
            assert_eq!(err, RegistryError::ReservedName(label.to_string()));
        }
    }

    #[test]
    fn test_interface_diamonds_are_flattened_once() {
        let mut builder = ClassRegistry::builder().declare(ClassDef::interface("L0"));
        for level in 1..=40 {
            builder = builder
                .declare(ClassDef::interface(format!("A{level}")).extends(format!("L{}", level - 1)))
                .declare(ClassDef::interface(format!("B{level}")).extends(format!("L{}", level - 1)))
                .declare(
                    ClassDef::interface(format!("L{level}"))
                        .extends(format!("A{level}"))
                        .extends(format!("B{level}")),
                );
        }
        let registry = builder
            .declare(ClassDef::class("Top").implements("L40"))
            .build()
            .unwrap();

        let interfaces = registry.interfaces("Top");
        assert_eq!(interfaces.len(), 1 + 40 * 3);
        assert_eq!(interfaces[..3], ["L40", "A40", "L39"]);
        assert!(registry.is_subtype_of("Top", "L0"));
    }
}
