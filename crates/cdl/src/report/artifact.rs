//! On-disk artifacts written and read by the reporting pipeline.
//!
//! Each step reads the previous step's output and fails fast with
//! [`CdlError::MissingInputArtifact`](crate::CdlError::MissingInputArtifact)
//! when it is absent, naming the command that produces it:
//!
//! | Step | Input | Output |
//! |------|-------|--------|
//! | `classify` | snapshot | [`SINGLE_TOKEN_REPORT`], [`MULTI_TOKEN_REPORT`] |
//! | `table` | [`SINGLE_TOKEN_REPORT`] | [`WHITELIST_TABLE`] |
//! | `props` | [`WHITELIST_TABLE`] | [`UTILITY_PROPS`] |
//! | `classes` | snapshot | [`CORE_CLASSES`] |
//! | `revise` | snapshot | [`REVISION_REPORT`] |

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classify::{Classification, ClassificationRecord};
use super::revision::RevisionReport;
use super::table::WhitelistTable;
use crate::error::Result;
use crate::io::{read_json, write_json};
use crate::utility::UtilityProps;

/// File name of the single-token report.
pub const SINGLE_TOKEN_REPORT: &str = "variants.single-token.json";
/// File name of the multi-token report.
pub const MULTI_TOKEN_REPORT: &str = "variants.multi-token.json";
/// File name of the prefix/value whitelist table.
pub const WHITELIST_TABLE: &str = "utilities.pure.by-prefix.json";
/// File name of the emitted utility-props map.
pub const UTILITY_PROPS: &str = "utility-props.generated.json";
/// File name of the core class list.
pub const CORE_CLASSES: &str = "core-classes.json";
/// File name of the revision report.
pub const REVISION_REPORT: &str = "cdl-revision-report.json";

/// Command that writes the token reports.
pub const CLASSIFY_HINT: &str = "cdl classify";
/// Command that writes the whitelist table.
pub const TABLE_HINT: &str = "cdl table";
/// Command that writes the utility-props map.
pub const PROPS_HINT: &str = "cdl props";

const SINGLE_TOKEN_RULE: &str =
    "Includes axis options whose value expands to exactly 1 Tailwind token.";
const MULTI_TOKEN_RULE: &str =
    "Includes any axis option whose value expands to 3+ Tailwind tokens.";
const GROUPING_RULE: &str =
    "prefix = token up to the first '-'; value = everything after it (may be empty)";
const RECONSTRUCTION_RULE: &str = "class = prefix-value, or prefix when value is empty";

/// A single- or multi-token report file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub rule: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub items: Vec<ClassificationRecord>,
}

impl TokenReport {
    fn new(input: &Path, rule: &str, items: Vec<ClassificationRecord>) -> Self {
        Self {
            generated_at: Some(Utc::now()),
            input: input.display().to_string(),
            rule: rule.to_string(),
            count: items.len(),
            items,
        }
    }

    /// Wraps the single-token bucket.
    pub fn single(input: &Path, items: Vec<ClassificationRecord>) -> Self {
        Self::new(input, SINGLE_TOKEN_RULE, items)
    }

    /// Wraps the multi-token bucket.
    pub fn multi(input: &Path, items: Vec<ClassificationRecord>) -> Self {
        Self::new(input, MULTI_TOKEN_RULE, items)
    }

    /// Reads a report written by [`write_classification`].
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref(), CLASSIFY_HINT)
    }
}

/// Paths written by [`write_classification`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationPaths {
    pub single_token: PathBuf,
    pub multi_token: PathBuf,
}

/// Writes both token reports into `out_dir`.
pub fn write_classification(
    classification: Classification,
    input: &Path,
    out_dir: &Path,
) -> Result<ClassificationPaths> {
    let paths = ClassificationPaths {
        single_token: out_dir.join(SINGLE_TOKEN_REPORT),
        multi_token: out_dir.join(MULTI_TOKEN_REPORT),
    };
    write_json(
        &paths.multi_token,
        &TokenReport::multi(input, classification.multi_token),
    )?;
    write_json(
        &paths.single_token,
        &TokenReport::single(input, classification.single_token),
    )?;
    Ok(paths)
}

/// The whitelist table file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub grouping_rule: String,
    #[serde(default)]
    pub reconstruction_rule: String,
    #[serde(default)]
    pub prefix_count: usize,
    #[serde(default)]
    pub total_unique_tokens: usize,
    #[serde(default)]
    pub table: WhitelistTable,
}

impl TableArtifact {
    /// Wraps a built table.
    pub fn new(input: &Path, table: WhitelistTable) -> Self {
        Self {
            generated_at: Some(Utc::now()),
            input: input.display().to_string(),
            grouping_rule: GROUPING_RULE.to_string(),
            reconstruction_rule: RECONSTRUCTION_RULE.to_string(),
            prefix_count: table.len(),
            total_unique_tokens: table.total_unique_tokens(),
            table,
        }
    }

    /// Reads a table file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref(), TABLE_HINT)
    }

    /// Writes the table file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self)
    }
}

/// The utility-props map handed to the render-time validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilityPropsArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub utility_props: UtilityProps,
}

impl UtilityPropsArtifact {
    /// Derives the props map from a table.
    pub fn from_table(input: &Path, table: &WhitelistTable) -> Self {
        Self {
            generated_at: Some(Utc::now()),
            input: input.display().to_string(),
            utility_props: UtilityProps::from_table(table),
        }
    }

    /// Reads a props file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref(), PROPS_HINT)
    }

    /// Writes the props file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self)
    }
}

/// The core class list file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreClassesArtifact {
    pub classes: Vec<String>,
    pub count: usize,
    pub generated_from: String,
    pub timestamp: DateTime<Utc>,
}

impl CoreClassesArtifact {
    /// Wraps a class list.
    pub fn new(input: &Path, classes: Vec<String>) -> Self {
        Self {
            count: classes.len(),
            classes,
            generated_from: input.display().to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Writes the class list file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self)
    }
}

/// The revision report file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionArtifact {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    #[serde(flatten)]
    pub report: RevisionReport,
}

impl RevisionArtifact {
    /// Wraps a revision report.
    pub fn new(input: &Path, report: RevisionReport) -> Self {
        Self {
            generated_at: Utc::now(),
            source: input.display().to_string(),
            report,
        }
    }

    /// Writes the report file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self)
    }
}
