//! Insert-once caches keyed by runtime type
//!
//! Entries are computed lazily on first lookup and never change afterwards.
//! There is no eviction: the number of distinct classes a process deals with
//! is small and finite. [`TypeCache::reset`] exists for test isolation.

use std::fmt;

use dashmap::DashMap;

/// Identifies the runtime type a cache entry was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// An instance of the named class.
    Object(String),
    /// A string naming a class or interface.
    ClassName(String),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Object(class) => write!(f, "object:{}", class),
            CacheKey::ClassName(name) => write!(f, "class:{}", name),
        }
    }
}

/// A thread-safe map from [`CacheKey`] to a computed value.
///
/// Readers never observe a partially written entry: a value is computed
/// outside any shard lock and inserted only if no other caller got there
/// first.
///
/// # Example
///
/// ```rust
/// use duckcheck::cache::{CacheKey, TypeCache};
///
/// let cache: TypeCache<usize> = TypeCache::new();
/// let key = CacheKey::Object("Foo".into());
///
/// assert_eq!(cache.get_or_insert_with(&key, || 1), 1);
/// assert_eq!(cache.get_or_insert_with(&key, || 2), 1);
/// assert_eq!(cache.len(), 1);
///
/// cache.reset();
/// assert!(cache.is_empty());
/// ```
pub struct TypeCache<V> {
    entries: DashMap<CacheKey, V>,
}

impl<V: Clone> TypeCache<V> {
    /// Create an empty cache.
    pub fn new() -> Self {
        TypeCache {
            entries: DashMap::new(),
        }
    }

    /// Look up an entry.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Return the cached entry for `key`, computing and storing it first if
    /// absent. If two callers race, the first insert wins and both see it.
    ///
    /// `compute` runs without holding a lock, so it may itself consult
    /// other caches.
    pub fn get_or_insert_with<F>(&self, key: &CacheKey, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(hit) = self.get(key) {
            return hit;
        }

        let value = compute();

        #[cfg(feature = "tracing")]
        tracing::trace!(key = %key, "type cache miss");

        self.entries
            .entry(key.clone())
            .or_insert(value)
            .value()
            .clone()
    }

    /// Drop every entry.
    pub fn reset(&self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(entries = self.entries.len(), "type cache reset");

        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for TypeCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for TypeCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeCache")
            .field("entries", &self.entries.len())
            .finish()
    }
}
