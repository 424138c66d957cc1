//! Hydrating a [`Registry`] from the on-disk snapshot, and writing it back.
//!
//! The snapshot is produced by the extraction step that harvests definitions
//! from component sources:
//!
//! ```json
//! {
//!   "map": {
//!     "button": {
//!       "buttonSizeVariants": {
//!         "base": ["inline-flex"],
//!         "variants": { "size": { "sm": ["h-8"], "md": ["h-10"] } },
//!         "defaultVariants": { "size": "md" },
//!         "source": "src/variants/button.ts"
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! A bare map without the `map` wrapper is accepted too.
//!
//! # Tolerance
//!
//! Upstream data is often partially populated, so loading never fails on
//! shape. Sections of the wrong type are treated as empty:
//!
//! - namespaces or definitions that are not objects are skipped
//! - `base` or an option value that is not an array becomes `[]`
//! - `variants`, an axis, or `defaultVariants` that is not an object becomes `{}`
//! - non-string tokens and non-string defaults are dropped
//!
//! Each of these is logged at `warn`.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{CdlError, Result};
use crate::io::{read_required, write_json};
use crate::registry::Registry;
use crate::variant::{Axis, VariantDefinition};

/// Hint shown when the snapshot file does not exist.
pub const EXTRACT_HINT: &str =
    "the CDL extraction step (or set CDL_VARIANTS_JSON=/path/to/file)";

/// Builds a registry from a parsed snapshot value.
pub fn registry_from_value(value: &Value) -> Registry {
    let map = value.get("map").unwrap_or(value);
    let mut registry = Registry::new();

    let Some(namespaces) = map.as_object() else {
        warn!("snapshot map is not an object; treating as empty");
        return registry;
    };

    for (namespace, definitions) in namespaces {
        let Some(definitions) = definitions.as_object() else {
            warn!(namespace = %namespace, "namespace is not an object; skipped");
            continue;
        };
        for (name, raw) in definitions {
            let Some(raw) = raw.as_object() else {
                warn!(namespace = %namespace, name = %name, "definition is not an object; skipped");
                continue;
            };
            registry.insert(namespace.as_str(), name.as_str(), definition_from_object(raw));
        }
    }

    debug!(definitions = registry.len(), "registry hydrated from snapshot");
    registry
}

fn definition_from_object(raw: &Map<String, Value>) -> VariantDefinition {
    let mut definition = VariantDefinition::new().with_base(tokens_from(raw.get("base")));

    if let Some(variants) = object_or_empty(raw.get("variants"), "variants") {
        for (axis_name, options) in variants {
            let mut axis = Axis::new();
            if let Some(options) = object_or_empty(Some(options), axis_name) {
                for (option, tokens) in options {
                    axis.insert(option.as_str(), tokens_from(Some(tokens)));
                }
            }
            definition.insert_axis(axis_name.as_str(), axis);
        }
    }

    if let Some(defaults) = object_or_empty(raw.get("defaultVariants"), "defaultVariants") {
        for (axis, option) in defaults {
            match option.as_str() {
                Some(option) => definition = definition.with_default(axis.as_str(), option),
                None => warn!(axis = %axis, "non-string default dropped"),
            }
        }
    }

    if let Some(source) = raw.get("source").and_then(Value::as_str) {
        definition = definition.with_source(source);
    }

    definition
}

/// Returns the object, or `None` (logging when present but mistyped).
fn object_or_empty<'a>(value: Option<&'a Value>, section: &str) -> Option<&'a Map<String, Value>> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            warn!(section, "section is not an object; treated as empty");
            None
        }
    }
}

fn tokens_from(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        None | Some(Value::Null) => Vec::new(),
        Some(_) => {
            warn!("token list is not an array; treated as empty");
            Vec::new()
        }
    }
}

/// Parses a JSON snapshot string.
pub fn parse_json(text: &str) -> std::result::Result<Registry, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    Ok(registry_from_value(&value))
}

/// Loads a snapshot file. YAML is used for `.yaml`/`.yml` paths, JSON
/// otherwise.
///
/// # Errors
///
/// [`CdlError::MissingInputArtifact`] if the file does not exist, or an
/// I/O or parse error.
pub fn load(path: impl AsRef<Path>) -> Result<Registry> {
    let path = path.as_ref();
    let text = read_required(path, EXTRACT_HINT)?;

    let value = if is_yaml(path) {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&text).map_err(|source| CdlError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::to_value(yaml).map_err(|source| CdlError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str(&text).map_err(|source| CdlError::Json {
            path: path.to_path_buf(),
            source,
        })?
    };

    Ok(registry_from_value(&value))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Serializes a registry in snapshot form (`{ "map": ... }`).
pub fn to_value(registry: &Registry) -> Value {
    serde_json::json!({ "map": registry })
}

/// Writes a registry as a JSON snapshot.
pub fn write(registry: &Registry, path: impl AsRef<Path>) -> Result<()> {
    write_json(path.as_ref(), &to_value(registry))
}
