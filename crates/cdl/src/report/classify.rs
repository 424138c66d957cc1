//! Classification of axis options by how many tokens they resolve to.
//!
//! Every `(namespace, definition, axis, option)` tuple in a registry is
//! flattened to its token list, normalized (tokens trimmed, empties
//! dropped), and sorted into one of two buckets:
//!
//! | Token count | Bucket | Meaning |
//! |-------------|--------|---------|
//! | 1 | single-token | one utility class, eligible for direct utility props |
//! | 2 | none | left for manual review |
//! | 3+ | multi-token | compound styling, stays a named variant |
//! | 0 | none | nothing to report |
//!
//! The 2-token gap mirrors the heuristics the whitelist pipeline has always
//! used; widening either threshold changes which props get generated.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::registry::Registry;

/// Minimum normalized token count for the multi-token bucket.
pub const MULTI_TOKEN_MIN: usize = 3;

/// One axis option with its normalized tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassificationRecord {
    pub namespace: String,
    /// Name of the definition inside its namespace.
    pub variant: String,
    pub axis: String,
    pub option: String,
    pub token_count: usize,
    pub tokens: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ClassificationRecord {
    /// Composite sort key `namespace.variant.axis.option`.
    pub fn key(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.namespace, self.variant, self.axis, self.option
        )
    }

    /// The record's token when it holds exactly one.
    pub fn single_token(&self) -> Option<&str> {
        match self.tokens.as_slice() {
            [token] => Some(token.as_str()),
            _ => None,
        }
    }
}

/// Which bucket a normalized token count belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Single,
    Multi,
    Unclassified,
}

impl TokenClass {
    /// Classifies a normalized token list.
    pub fn of(tokens: &[String]) -> Self {
        match tokens.len() {
            1 if is_single_token(&tokens[0]) => TokenClass::Single,
            n if n >= MULTI_TOKEN_MIN => TokenClass::Multi,
            _ => TokenClass::Unclassified,
        }
    }
}

/// Returns true if `token` is one class: non-empty and free of whitespace.
pub fn is_single_token(token: &str) -> bool {
    let token = token.trim();
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

/// Trims every token and drops the ones left empty.
pub fn normalize_tokens(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|token| token.trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// The two classification buckets, each sorted by [`ClassificationRecord::key`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub single_token: Vec<ClassificationRecord>,
    pub multi_token: Vec<ClassificationRecord>,
}

/// Classifies every axis option in the registry.
///
/// # Example
///
/// ```rust
/// use cdl::report::classify;
/// use cdl::{Axis, Registry, VariantDefinition};
///
/// let registry = Registry::new().with(
///     "badge",
///     "badgeSizeVariants",
///     VariantDefinition::new().with_axis(
///         "size",
///         Axis::new()
///             .with_option("sm", ["px-2", "py-0.5", "text-xs"])
///             .with_option("pill", ["rounded-full"]),
///     ),
/// );
///
/// let buckets = classify(&registry);
/// assert_eq!(buckets.multi_token[0].option, "sm");
/// assert_eq!(buckets.single_token[0].tokens, vec!["rounded-full"]);
/// ```
pub fn classify(registry: &Registry) -> Classification {
    let mut classification = Classification::default();

    for entry in registry.iter() {
        for (axis_name, axis) in entry.definition.axes() {
            for (option, tokens) in axis.iter() {
                let tokens = normalize_tokens(tokens);
                let class = TokenClass::of(&tokens);
                if class == TokenClass::Unclassified {
                    continue;
                }

                let record = ClassificationRecord {
                    namespace: entry.namespace.to_string(),
                    variant: entry.name.to_string(),
                    axis: axis_name.to_string(),
                    option: option.to_string(),
                    token_count: tokens.len(),
                    tokens,
                    source: entry.definition.source().map(str::to_string),
                };

                match class {
                    TokenClass::Single => classification.single_token.push(record),
                    TokenClass::Multi => classification.multi_token.push(record),
                    TokenClass::Unclassified => {}
                }
            }
        }
    }

    classification
        .single_token
        .sort_by_cached_key(ClassificationRecord::key);
    classification
        .multi_token
        .sort_by_cached_key(ClassificationRecord::key);

    debug!(
        single = classification.single_token.len(),
        multi = classification.multi_token.len(),
        "classified axis options"
    );
    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{Axis, VariantDefinition};

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn registry() -> Registry {
        Registry::new()
            .with(
                "rounded",
                "roundedVariants",
                VariantDefinition::new()
                    .with_axis(
                        "rounded",
                        Axis::new()
                            .with_option("md", ["rounded-md"])
                            .with_option("none", ["rounded-none"]),
                    )
                    .with_source("src/variants/rounded.ts"),
            )
            .with(
                "badge",
                "badgeSizeVariants",
                VariantDefinition::new().with_axis(
                    "size",
                    Axis::new()
                        .with_option("sm", ["px-2", "py-0.5", "text-xs"])
                        .with_option("pair", ["px-2", "py-1"])
                        .with_option("empty", Vec::<String>::new())
                        .with_option("padded", [" rounded-md ", "  "]),
                ),
            )
    }

    #[test]
    fn test_normalize_tokens() {
        let tokens = strings(&["  px-2 ", "", "   ", "py-1"]);
        assert_eq!(normalize_tokens(&tokens), strings(&["px-2", "py-1"]));
    }

    #[test]
    fn test_token_class_thresholds() {
        assert_eq!(TokenClass::of(&[]), TokenClass::Unclassified);
        assert_eq!(TokenClass::of(&strings(&["a"])), TokenClass::Single);
        assert_eq!(TokenClass::of(&strings(&["a", "b"])), TokenClass::Unclassified);
        assert_eq!(TokenClass::of(&strings(&["a", "b", "c"])), TokenClass::Multi);
        assert_eq!(
            TokenClass::of(&strings(&["a", "b", "c", "d", "e"])),
            TokenClass::Multi
        );
    }

    #[test]
    fn test_single_token_rejects_internal_whitespace() {
        assert!(is_single_token("rounded-md"));
        assert!(!is_single_token("px-2 py-1"));
        assert!(!is_single_token("   "));
        assert_eq!(
            TokenClass::of(&strings(&["px-2 py-1"])),
            TokenClass::Unclassified
        );
    }

    #[test]
    fn test_classify_buckets() {
        let result = classify(&registry());

        let multi: Vec<String> = result.multi_token.iter().map(|r| r.key()).collect();
        assert_eq!(multi, vec!["badge.badgeSizeVariants.size.sm"]);
        assert_eq!(result.multi_token[0].token_count, 3);

        let single: Vec<String> = result.single_token.iter().map(|r| r.key()).collect();
        assert_eq!(
            single,
            vec![
                "badge.badgeSizeVariants.size.padded",
                "rounded.roundedVariants.rounded.md",
                "rounded.roundedVariants.rounded.none",
            ]
        );
    }

    #[test]
    fn test_classify_records_normalized_tokens_and_source() {
        let result = classify(&registry());
        let padded = result
            .single_token
            .iter()
            .find(|r| r.option == "padded")
            .unwrap();
        assert_eq!(padded.tokens, strings(&["rounded-md"]));
        assert_eq!(padded.token_count, 1);
        assert_eq!(padded.source, None);

        let md = result.single_token.iter().find(|r| r.option == "md").unwrap();
        assert_eq!(md.source.as_deref(), Some("src/variants/rounded.ts"));
        assert_eq!(md.single_token(), Some("rounded-md"));
    }

    #[test]
    fn test_classify_skips_zero_and_two_token_options() {
        let result = classify(&registry());
        assert!(result
            .single_token
            .iter()
            .chain(result.multi_token.iter())
            .all(|r| r.option != "pair" && r.option != "empty"));
    }

    #[test]
    fn test_classify_empty_registry() {
        let result = classify(&Registry::new());
        assert!(result.single_token.is_empty());
        assert!(result.multi_token.is_empty());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = ClassificationRecord {
            namespace: "badge".into(),
            variant: "badgeSizeVariants".into(),
            axis: "size".into(),
            option: "sm".into(),
            token_count: 3,
            tokens: strings(&["px-2", "py-0.5", "text-xs"]),
            source: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["tokenCount"], 3);
        assert!(json.get("source").is_none());
    }
}
