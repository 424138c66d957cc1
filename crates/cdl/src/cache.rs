//! Read-through memo of resolved class strings.
//!
//! Resolution is pure, so a given `(namespace, name, selection, strict)`
//! always yields the same string. [`ResolveCache`] remembers successful
//! results on top of a shared [`Registry`]. Failures are returned every
//! time and never stored.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::error::Result;
use crate::registry::Registry;
use crate::resolve::ResolveOptions;
use crate::variant::Selection;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    namespace: String,
    name: String,
    selection: Vec<(String, String)>,
    strict: bool,
}

/// A registry with memoized resolution.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use cdl::cache::ResolveCache;
/// use cdl::{Axis, Registry, ResolveOptions, Selection, VariantDefinition};
///
/// let registry = Registry::new().with(
///     "rounded",
///     "roundedVariants",
///     VariantDefinition::new().with_axis("rounded", Axis::new().with_option("md", ["rounded-md"])),
/// );
/// let cache = ResolveCache::new(Arc::new(registry));
///
/// let selection = Selection::from([("rounded", "md")]);
/// let classes = cache
///     .resolve("rounded", "roundedVariants", &selection, ResolveOptions::STRICT)
///     .unwrap();
/// assert_eq!(classes, "rounded-md");
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug)]
pub struct ResolveCache {
    registry: Arc<Registry>,
    entries: Mutex<HashMap<CacheKey, String>>,
}

impl ResolveCache {
    /// Creates an empty cache over `registry`.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    // Entries are plain strings, so a poisoned map is still consistent.
    fn entries(&self) -> MutexGuard<'_, HashMap<CacheKey, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolves through the cache.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::resolve`]. Errors are not cached.
    pub fn resolve(
        &self,
        namespace: &str,
        name: &str,
        selection: &Selection,
        options: ResolveOptions,
    ) -> Result<String> {
        let key = CacheKey {
            namespace: namespace.to_string(),
            name: name.to_string(),
            selection: selection.cache_key(),
            strict: options.strict,
        };

        if let Some(hit) = self.entries().get(&key) {
            trace!(namespace, name, "resolve cache hit");
            return Ok(hit.clone());
        }

        let classes = self.registry.resolve(namespace, name, selection, options)?;
        self.entries().insert(key, classes.clone());
        Ok(classes)
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Drops every cached result.
    pub fn clear(&self) {
        self.entries().clear();
    }
}
