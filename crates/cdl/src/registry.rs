//! Registry of variant definitions keyed by namespace and name.
//!
//! The registry is built once (from a snapshot, or programmatically) and is
//! read-only while resolving. It is passed explicitly to whatever needs it;
//! there is no process-wide instance.
//!
//! # Layout
//!
//! - **namespace**: usually the stem of the file a definition came from
//!   (`"button"`, `"grid"`)
//! - **name**: the exported definition inside that file
//!   (`"buttonSizeVariants"`)
//!
//! Both levels keep insertion order. Lookups are exact; a miss is a
//! [`CdlError::MissingVariantDefinition`].

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{CdlError, Result};
use crate::resolve::{resolve, ResolveOptions};
use crate::variant::{Selection, VariantDefinition};

/// A definition together with its registry coordinates.
#[derive(Debug, Clone, Copy)]
pub struct DefinitionEntry<'a> {
    pub namespace: &'a str,
    pub name: &'a str,
    pub definition: &'a VariantDefinition,
}

/// Two-level map of namespace -> definition name -> [`VariantDefinition`].
///
/// # Example
///
/// ```rust
/// use cdl::{Axis, Registry, ResolveOptions, Selection, VariantDefinition};
///
/// let mut registry = Registry::new();
/// registry.insert(
///     "badge",
///     "badgeSizeVariants",
///     VariantDefinition::new()
///         .with_axis("size", Axis::new().with_option("sm", ["px-2", "py-0.5", "text-xs"]))
///         .with_default("size", "sm"),
/// );
///
/// let classes = registry
///     .resolve("badge", "badgeSizeVariants", &Selection::new(), ResolveOptions::default())
///     .unwrap();
/// assert_eq!(classes, "px-2 py-0.5 text-xs");
///
/// assert!(registry.get("badge", "nonexistentVariants").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    namespaces: IndexMap<String, IndexMap<String, VariantDefinition>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition, replacing any existing one at the same coordinates.
    pub fn insert(
        &mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        definition: VariantDefinition,
    ) {
        self.namespaces
            .entry(namespace.into())
            .or_default()
            .insert(name.into(), definition);
    }

    /// Adds a definition, returning the registry for chaining.
    pub fn with(
        mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        definition: VariantDefinition,
    ) -> Self {
        self.insert(namespace, name, definition);
        self
    }

    /// Looks up a definition.
    ///
    /// # Errors
    ///
    /// Returns [`CdlError::MissingVariantDefinition`] when either the
    /// namespace or the name is absent.
    pub fn get(&self, namespace: &str, name: &str) -> Result<&VariantDefinition> {
        self.namespaces
            .get(namespace)
            .and_then(|definitions| definitions.get(name))
            .ok_or_else(|| CdlError::missing_definition(namespace, name))
    }

    /// Returns true if a definition exists at the given coordinates.
    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.get(namespace, name).is_ok()
    }

    /// Looks up a definition and resolves it.
    ///
    /// # Errors
    ///
    /// Fails if the definition is missing, or if strict resolution hits an
    /// unknown option.
    pub fn resolve(
        &self,
        namespace: &str,
        name: &str,
        selection: &Selection,
        options: ResolveOptions,
    ) -> Result<String> {
        resolve(self.get(namespace, name)?, selection, options)
    }

    /// Iterates namespace names in insertion order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    /// Iterates the definitions of one namespace. Empty if the namespace is
    /// unknown.
    pub fn definitions_in<'a>(
        &'a self,
        namespace: &str,
    ) -> impl Iterator<Item = (&'a str, &'a VariantDefinition)> {
        self.namespaces
            .get(namespace)
            .into_iter()
            .flat_map(|definitions| definitions.iter().map(|(n, d)| (n.as_str(), d)))
    }

    /// Iterates every definition with its coordinates.
    pub fn iter(&self) -> impl Iterator<Item = DefinitionEntry<'_>> {
        self.namespaces.iter().flat_map(|(namespace, definitions)| {
            definitions.iter().map(move |(name, definition)| DefinitionEntry {
                namespace,
                name,
                definition,
            })
        })
    }

    /// Total number of definitions across all namespaces.
    pub fn len(&self) -> usize {
        self.namespaces.values().map(IndexMap::len).sum()
    }

    /// Returns true if no definitions are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Axis;

    fn registry() -> Registry {
        Registry::new()
            .with(
                "badge",
                "badgeSizeVariants",
                VariantDefinition::new()
                    .with_axis(
                        "size",
                        Axis::new()
                            .with_option("sm", ["px-2", "py-0.5", "text-xs"])
                            .with_option("lg", ["px-3", "py-1", "text-sm"]),
                    )
                    .with_default("size", "sm"),
            )
            .with(
                "badge",
                "badgeStyleVariants",
                VariantDefinition::new().with_base(["inline-flex", "items-center"]),
            )
            .with(
                "rounded",
                "roundedVariants",
                VariantDefinition::new()
                    .with_axis("rounded", Axis::new().with_option("md", ["rounded-md"])),
            )
    }

    #[test]
    fn test_registry_get() {
        let registry = registry();
        let def = registry.get("badge", "badgeStyleVariants").unwrap();
        assert_eq!(def.base().len(), 2);
    }

    #[test]
    fn test_registry_missing_name() {
        let err = registry()
            .get("badge", "nonexistentVariants")
            .unwrap_err();
        assert!(matches!(err, CdlError::MissingVariantDefinition { .. }));
        let msg = err.to_string();
        assert!(msg.contains("badge"));
        assert!(msg.contains("nonexistentVariants"));
    }

    #[test]
    fn test_registry_missing_namespace() {
        let err = registry().get("tooltip", "tooltipVariants").unwrap_err();
        match err {
            CdlError::MissingVariantDefinition { namespace, name } => {
                assert_eq!(namespace, "tooltip");
                assert_eq!(name, "tooltipVariants");
            }
            other => panic!("Expected MissingVariantDefinition, got {other:?}"),
        }
    }

    #[test]
    fn test_registry_lookup_is_exact() {
        let registry = registry();
        assert!(!registry.contains("Badge", "badgeStyleVariants"));
        assert!(!registry.contains("badge", "badgestylevariants"));
        assert!(registry.contains("badge", "badgeStyleVariants"));
    }

    #[test]
    fn test_registry_resolve() {
        let out = registry()
            .resolve(
                "badge",
                "badgeSizeVariants",
                &Selection::from([("size", "lg")]),
                ResolveOptions::STRICT,
            )
            .unwrap();
        assert_eq!(out, "px-3 py-1 text-sm");
    }

    #[test]
    fn test_registry_resolve_missing_fails_before_resolution() {
        let result = registry().resolve(
            "badge",
            "ghostVariants",
            &Selection::new(),
            ResolveOptions::LENIENT,
        );
        assert!(matches!(
            result,
            Err(CdlError::MissingVariantDefinition { .. })
        ));
    }

    #[test]
    fn test_registry_iteration_order() {
        let registry = registry();
        let namespaces: Vec<&str> = registry.namespaces().collect();
        assert_eq!(namespaces, vec!["badge", "rounded"]);

        let coords: Vec<(&str, &str)> = registry.iter().map(|e| (e.namespace, e.name)).collect();
        assert_eq!(
            coords,
            vec![
                ("badge", "badgeSizeVariants"),
                ("badge", "badgeStyleVariants"),
                ("rounded", "roundedVariants"),
            ]
        );

        let names: Vec<&str> = registry.definitions_in("badge").map(|(n, _)| n).collect();
        assert_eq!(names, vec!["badgeSizeVariants", "badgeStyleVariants"]);
        assert_eq!(registry.definitions_in("missing").count(), 0);
    }

    #[test]
    fn test_registry_len() {
        assert_eq!(registry().len(), 3);
        assert!(!registry().is_empty());
        assert!(Registry::new().is_empty());
    }

    #[test]
    fn test_registry_insert_replaces() {
        let mut registry = registry();
        registry.insert(
            "badge",
            "badgeStyleVariants",
            VariantDefinition::new().with_base(["flex"]),
        );
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.get("badge", "badgeStyleVariants").unwrap().base(),
            &["flex".to_string()]
        );
    }
}
