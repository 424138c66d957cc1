//! Error types for lookup, resolution and the reporting pipeline.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T, E = CdlError> = std::result::Result<T, E>;

/// Errors raised by the CDL compiler and its reporting pipeline.
///
/// Lookup and resolution errors are authoring bugs: callers are expected
/// to let them propagate rather than recover.
#[derive(Debug, thiserror::Error)]
pub enum CdlError {
    /// A `(namespace, name)` lookup found nothing in the registry.
    #[error("Missing CDL variant definition: {namespace}.{name}")]
    MissingVariantDefinition { namespace: String, name: String },

    /// Strict resolution selected an option the axis does not define.
    ///
    /// `known` holds the axis's option names, sorted.
    #[error("Unknown variant option: {axis}={chosen}. Known: {}", .known.join(", "))]
    UnknownVariantOption {
        axis: String,
        chosen: String,
        known: Vec<String>,
    },

    /// A pipeline step could not find the artifact an earlier step writes.
    #[error("Missing input: {}\nRun: {hint}", .path.display())]
    MissingInputArtifact { path: PathBuf, hint: String },

    /// Reading or writing an artifact failed.
    #[error("Failed to access \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact was not valid JSON, or could not be serialized.
    #[error("Invalid JSON in \"{}\": {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A YAML snapshot could not be parsed.
    #[error("Invalid YAML in \"{}\": {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl CdlError {
    pub(crate) fn missing_definition(namespace: &str, name: &str) -> Self {
        CdlError::MissingVariantDefinition {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    pub(crate) fn missing_input(path: impl Into<PathBuf>, hint: impl Into<String>) -> Self {
        CdlError::MissingInputArtifact {
            path: path.into(),
            hint: hint.into(),
        }
    }
}
