//! Resolved file locations for one pipeline run.

use std::path::{Path, PathBuf};

use cdl::report::artifact::{
    CORE_CLASSES, MULTI_TOKEN_REPORT, REVISION_REPORT, SINGLE_TOKEN_REPORT, UTILITY_PROPS,
    WHITELIST_TABLE,
};

/// Snapshot read when neither `--snapshot` nor `CDL_VARIANTS_JSON` is set.
pub const DEFAULT_SNAPSHOT: &str = ".project/cdl/variants.generated.json";

/// Reports directory used when neither `--reports-dir` nor `CDL_REPORTS_DIR`
/// is set.
pub const DEFAULT_REPORTS_DIR: &str = ".project/reports";

/// Where each step reads from and writes to.
///
/// Outputs always land in `reports_dir`; the two cross-step inputs can be
/// pointed elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub snapshot: PathBuf,
    pub reports_dir: PathBuf,
    single_token_input: Option<PathBuf>,
    table_input: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn new(snapshot: impl Into<PathBuf>, reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshot: snapshot.into(),
            reports_dir: reports_dir.into(),
            single_token_input: None,
            table_input: None,
        }
    }

    /// Reads the single-token report from `path` instead of the reports dir.
    pub fn with_single_token_input(mut self, path: Option<PathBuf>) -> Self {
        self.single_token_input = path;
        self
    }

    /// Reads the whitelist table from `path` instead of the reports dir.
    pub fn with_table_input(mut self, path: Option<PathBuf>) -> Self {
        self.table_input = path;
        self
    }

    fn report(&self, name: &str) -> PathBuf {
        self.reports_dir.join(name)
    }

    pub fn single_token_report(&self) -> PathBuf {
        self.report(SINGLE_TOKEN_REPORT)
    }

    pub fn multi_token_report(&self) -> PathBuf {
        self.report(MULTI_TOKEN_REPORT)
    }

    pub fn table(&self) -> PathBuf {
        self.report(WHITELIST_TABLE)
    }

    pub fn utility_props(&self) -> PathBuf {
        self.report(UTILITY_PROPS)
    }

    pub fn core_classes(&self) -> PathBuf {
        self.report(CORE_CLASSES)
    }

    pub fn revision_report(&self) -> PathBuf {
        self.report(REVISION_REPORT)
    }

    /// Input of the `table` step.
    pub fn table_source(&self) -> PathBuf {
        self.single_token_input
            .clone()
            .unwrap_or_else(|| self.single_token_report())
    }

    /// Input of the `props` step.
    pub fn props_source(&self) -> PathBuf {
        self.table_input.clone().unwrap_or_else(|| self.table())
    }

    pub fn snapshot(&self) -> &Path {
        &self.snapshot
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT, DEFAULT_REPORTS_DIR)
    }
}
