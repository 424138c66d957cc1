//! Revision report: which axes could become plain utility props.
//!
//! An axis is a **utility** axis when it could be replaced by a direct
//! prefix/value table:
//!
//! - it has at least one option
//! - no option resolves to more than one token
//! - at least one option resolves to a token
//! - no token is blank or carries a `:` modifier
//!
//! Everything else stays a **variant** axis.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::registry::Registry;
use crate::variant::Axis;

/// How an axis should be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Utility,
    Variant,
}

impl AxisKind {
    /// Classifies an axis.
    pub fn of(axis: &Axis) -> Self {
        if is_utility_axis(axis) {
            AxisKind::Utility
        } else {
            AxisKind::Variant
        }
    }
}

fn is_utility_axis(axis: &Axis) -> bool {
    if axis.is_empty() {
        return false;
    }

    let mut any_token = false;
    for (_, tokens) in axis.iter() {
        match tokens {
            [] => {}
            [token] => {
                if token.trim().is_empty() || token.contains(':') {
                    return false;
                }
                any_token = true;
            }
            _ => return false,
        }
    }
    any_token
}

/// Per-axis entry of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisRevision {
    pub kind: AxisKind,
    pub option_count: usize,
    /// Raw (not normalized) token count per option, in option order.
    pub option_token_counts: IndexMap<String, usize>,
}

/// Per-definition entry of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionRevision {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub base_token_count: usize,
    pub axes: IndexMap<String, AxisRevision>,
}

/// Totals across the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionSummary {
    pub total_variant_defs: usize,
    pub total_axes: usize,
    pub axes_utility: usize,
    pub axes_variant: usize,
    pub unique_tokens: usize,
}

/// The full report, keyed by namespace then definition name in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionReport {
    pub namespaces: IndexMap<String, IndexMap<String, DefinitionRevision>>,
    pub summary: RevisionSummary,
}

/// Builds the revision report for a registry.
pub fn revise(registry: &Registry) -> RevisionReport {
    let mut report = RevisionReport::default();
    let mut unique: HashSet<&str> = HashSet::new();

    for entry in registry.iter() {
        let definition = entry.definition;
        report.summary.total_variant_defs += 1;
        unique.extend(definition.all_tokens());

        let mut axes = IndexMap::new();
        for (axis_name, axis) in definition.axes() {
            let kind = AxisKind::of(axis);
            report.summary.total_axes += 1;
            match kind {
                AxisKind::Utility => report.summary.axes_utility += 1,
                AxisKind::Variant => report.summary.axes_variant += 1,
            }

            axes.insert(
                axis_name.to_string(),
                AxisRevision {
                    kind,
                    option_count: axis.len(),
                    option_token_counts: axis
                        .iter()
                        .map(|(option, tokens)| (option.to_string(), tokens.len()))
                        .collect(),
                },
            );
        }

        report
            .namespaces
            .entry(entry.namespace.to_string())
            .or_default()
            .insert(
                entry.name.to_string(),
                DefinitionRevision {
                    source: definition.source().map(str::to_string),
                    base_token_count: definition.base().len(),
                    axes,
                },
            );
    }

    report.summary.unique_tokens = unique.len();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::VariantDefinition;

    #[test]
    fn test_axis_kind_utility() {
        let axis = Axis::new()
            .with_option("none", Vec::<String>::new())
            .with_option("sm", ["rounded-sm"])
            .with_option("md", ["rounded-md"]);
        assert_eq!(AxisKind::of(&axis), AxisKind::Utility);
    }

    #[test]
    fn test_axis_kind_variant_cases() {
        let multi = Axis::new().with_option("sm", ["px-2", "py-1"]);
        let modifier = Axis::new().with_option("hover", ["hover:bg-muted"]);
        let blank = Axis::new().with_option("x", ["  "]);
        let all_empty = Axis::new().with_option("none", Vec::<String>::new());
        let no_options = Axis::new();

        for axis in [multi, modifier, blank, all_empty, no_options] {
            assert_eq!(AxisKind::of(&axis), AxisKind::Variant, "{axis:?}");
        }
    }

    #[test]
    fn test_axis_kind_allows_slash_tokens() {
        let axis = Axis::new().with_option("muted", ["bg-muted/50"]);
        assert_eq!(AxisKind::of(&axis), AxisKind::Utility);
    }

    #[test]
    fn test_revise() {
        let registry = Registry::new()
            .with(
                "badge",
                "badgeSizeVariants",
                VariantDefinition::new()
                    .with_base(["inline-flex"])
                    .with_axis(
                        "size",
                        Axis::new()
                            .with_option("sm", ["px-2", "py-0.5", "text-xs"])
                            .with_option("lg", ["px-3", "py-1", "text-sm"]),
                    )
                    .with_axis("rounded", Axis::new().with_option("full", ["rounded-full"]))
                    .with_source("src/variants/badge.ts"),
            )
            .with(
                "shadow",
                "shadowVariants",
                VariantDefinition::new()
                    .with_axis("shadow", Axis::new().with_option("md", ["shadow-md"])),
            );

        let report = revise(&registry);
        assert_eq!(
            report.summary,
            RevisionSummary {
                total_variant_defs: 2,
                total_axes: 3,
                axes_utility: 2,
                axes_variant: 1,
                unique_tokens: 9,
            }
        );

        let badge = &report.namespaces["badge"]["badgeSizeVariants"];
        assert_eq!(badge.base_token_count, 1);
        assert_eq!(badge.source.as_deref(), Some("src/variants/badge.ts"));
        assert_eq!(badge.axes["size"].kind, AxisKind::Variant);
        assert_eq!(badge.axes["size"].option_count, 2);
        assert_eq!(badge.axes["size"].option_token_counts["sm"], 3);
        assert_eq!(badge.axes["rounded"].kind, AxisKind::Utility);
    }

    #[test]
    fn test_revision_serializes_camel_case() {
        let registry = Registry::new().with(
            "shadow",
            "shadowVariants",
            VariantDefinition::new().with_axis("shadow", Axis::new().with_option("md", ["shadow-md"])),
        );
        let json = serde_json::to_value(revise(&registry)).unwrap();
        assert_eq!(json["summary"]["axesUtility"], 1);
        assert_eq!(
            json["namespaces"]["shadow"]["shadowVariants"]["axes"]["shadow"]["kind"],
            "utility"
        );
        assert_eq!(
            json["namespaces"]["shadow"]["shadowVariants"]["baseTokenCount"],
            0
        );
    }
}
