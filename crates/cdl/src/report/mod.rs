//! Offline reports derived from a registry.
//!
//! None of these feed back into resolution; they exist so tooling can
//! audit the registry and generate utility-prop whitelists.
//!
//! - [`classify`] buckets axis options by token count
//! - [`build_table`] groups single tokens by prefix
//! - [`collect_classes`] lists every class a registry can emit
//! - [`revise`] flags axes that could become utility props
//! - [`artifact`] holds the JSON files each step reads and writes

pub mod artifact;
mod classes;
mod classify;
mod revision;
mod table;

pub use artifact::{
    write_classification, ClassificationPaths, CoreClassesArtifact, RevisionArtifact,
    TableArtifact, TokenReport, UtilityPropsArtifact,
};
pub use classes::collect_classes;
pub use classify::{
    classify, is_single_token, normalize_tokens, Classification, ClassificationRecord, TokenClass,
    MULTI_TOKEN_MIN,
};
pub use revision::{
    revise, AxisKind, AxisRevision, DefinitionRevision, RevisionReport, RevisionSummary,
};
pub use table::{build_table, reconstruct, split_token, TableEntry, WhitelistTable};
