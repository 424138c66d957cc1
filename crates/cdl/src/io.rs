//! File access shared by the snapshot loader and report artifacts.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CdlError, Result};

/// Reads a file that an earlier pipeline step must have produced.
///
/// A missing file is a [`CdlError::MissingInputArtifact`] carrying `hint`,
/// the command that produces it.
pub(crate) fn read_required(path: &Path, hint: &str) -> Result<String> {
    if !path.exists() {
        return Err(CdlError::missing_input(path, hint));
    }
    fs::read_to_string(path).map_err(|source| CdlError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and deserializes a required JSON file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path, hint: &str) -> Result<T> {
    let text = read_required(path, hint)?;
    serde_json::from_str(&text).map_err(|source| CdlError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes pretty JSON with a trailing newline, creating parent directories.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value).map_err(|source| CdlError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    text.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CdlError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, text).map_err(|source| CdlError::Io {
        path: path.to_path_buf(),
        source,
    })
}
