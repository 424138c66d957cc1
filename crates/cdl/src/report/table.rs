//! Prefix/value whitelist table built from single-token records.
//!
//! Each single token is split at its first hyphen:
//!
//! | Token | Prefix | Value |
//! |-------|--------|-------|
//! | `rounded-md` | `rounded` | `md` |
//! | `row-start-1` | `row` | `start-1` |
//! | `border` | `border` | `` |
//!
//! and the table records, per prefix, the distinct values seen and how many
//! distinct tokens contributed. Tokens are rebuilt with [`reconstruct`]:
//! `value ? prefix-value : prefix`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::classify::ClassificationRecord;

/// One prefix's entry in the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    /// Number of distinct tokens with this prefix.
    pub count: usize,
    /// Distinct values, sorted. May contain `""` for the bare prefix.
    pub values: Vec<String>,
}

/// Splits a token at its first hyphen into `(prefix, value)`.
///
/// The token is trimmed first. Without a hyphen the whole token is the
/// prefix and the value is empty.
pub fn split_token(token: &str) -> (&str, &str) {
    let token = token.trim();
    token.split_once('-').unwrap_or((token, ""))
}

/// Rebuilds a token from its prefix and value.
pub fn reconstruct(prefix: &str, value: &str) -> String {
    if value.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}-{value}")
    }
}

/// Mapping of prefix to allowed values.
///
/// This is a derived artifact: the registry stays authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WhitelistTable {
    entries: BTreeMap<String, TableEntry>,
}

impl WhitelistTable {
    /// Builds a table from bare tokens.
    ///
    /// Tokens with an empty prefix (a leading hyphen, or blank) are skipped.
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        let mut values: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut distinct: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for token in tokens {
            let (prefix, value) = split_token(token);
            if prefix.is_empty() {
                continue;
            }
            values
                .entry(prefix.to_string())
                .or_default()
                .insert(value.to_string());
            distinct
                .entry(prefix.to_string())
                .or_default()
                .insert(token.trim().to_string());
        }

        let entries = values
            .into_iter()
            .map(|(prefix, values)| {
                let count = distinct.get(&prefix).map_or(0, BTreeSet::len);
                let entry = TableEntry {
                    count,
                    values: values.into_iter().collect(),
                };
                (prefix, entry)
            })
            .collect();

        Self { entries }
    }

    /// Looks up a prefix.
    pub fn get(&self, prefix: &str) -> Option<&TableEntry> {
        self.entries.get(prefix)
    }

    /// Returns true if `prefix` is known.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.entries.contains_key(prefix)
    }

    /// Returns true if `prefix` allows `value` (`""` for the bare prefix).
    pub fn allows(&self, prefix: &str, value: &str) -> bool {
        self.entries
            .get(prefix)
            .is_some_and(|entry| entry.values.iter().any(|v| v == value))
    }

    /// Iterates entries sorted by prefix.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableEntry)> {
        self.entries.iter().map(|(prefix, entry)| (prefix.as_str(), entry))
    }

    /// Iterates every whitelisted token, rebuilt from prefix and value.
    pub fn tokens(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().flat_map(|(prefix, entry)| {
            entry.values.iter().map(move |value| reconstruct(prefix, value))
        })
    }

    /// Number of prefixes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no prefixes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of distinct tokens across prefixes.
    pub fn total_unique_tokens(&self) -> usize {
        self.entries.values().map(|entry| entry.count).sum()
    }
}

/// Builds the whitelist table from single-token records.
///
/// Only each record's first token is considered; records without tokens
/// are skipped.
///
/// # Example
///
/// ```rust
/// use cdl::report::{build_table, ClassificationRecord};
///
/// let record = ClassificationRecord {
///     namespace: "rounded".into(),
///     variant: "roundedVariants".into(),
///     axis: "rounded".into(),
///     option: "md".into(),
///     token_count: 1,
///     tokens: vec!["rounded-md".into()],
///     source: None,
/// };
///
/// let table = build_table(&[record]);
/// assert_eq!(table.get("rounded").unwrap().values, vec!["md"]);
/// ```
pub fn build_table(records: &[ClassificationRecord]) -> WhitelistTable {
    WhitelistTable::from_tokens(
        records
            .iter()
            .filter_map(|record| record.tokens.first().map(String::as_str)),
    )
}
