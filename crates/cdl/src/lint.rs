//! Token lint: finds classes that carry modifiers or arbitrary values.
//!
//! A token is clean when it is only lowercase letters, digits and hyphens.
//! Anything else (`hover:`, `/50`, `[...]`, `.5`, `&`) marks a modifier,
//! fraction, arbitrary value or compound selector, which the whitelist
//! table cannot express as a prefix/value pair.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::registry::Registry;

static CLEAN_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("clean-token pattern is valid"));

/// Location reported for base tokens.
pub const BASE_LOCATION: &str = "<base>";

/// Returns true if `token` is only `[a-z0-9-]`.
pub fn is_clean_token(token: &str) -> bool {
    CLEAN_TOKEN.is_match(token)
}

/// Tokens of one base list or option that are not clean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintFinding {
    pub namespace: String,
    pub variant: String,
    /// `<base>` or `variants.<axis>.<option>`.
    pub location: String,
    pub tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

fn unclean<'a>(tokens: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    tokens
        .into_iter()
        .flat_map(|token| token.split_whitespace())
        .filter(|token| !is_clean_token(token))
        .map(str::to_string)
        .collect()
}

/// Lints every base list and option in registry order.
///
/// One finding is produced per list that has at least one unclean token.
pub fn lint_registry(registry: &Registry) -> Vec<LintFinding> {
    let mut findings = Vec::new();

    for entry in registry.iter() {
        let definition = entry.definition;
        let finding = |location: String, tokens: Vec<String>| LintFinding {
            namespace: entry.namespace.to_string(),
            variant: entry.name.to_string(),
            location,
            tokens,
            source: definition.source().map(str::to_string),
        };

        let base = unclean(definition.base());
        if !base.is_empty() {
            findings.push(finding(BASE_LOCATION.to_string(), base));
        }

        for (axis_name, axis) in definition.axes() {
            for (option, tokens) in axis.iter() {
                let tokens = unclean(tokens);
                if !tokens.is_empty() {
                    findings.push(finding(format!("variants.{axis_name}.{option}"), tokens));
                }
            }
        }
    }

    debug!(findings = findings.len(), "linted registry tokens");
    findings
}
