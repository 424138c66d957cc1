//! The core class list: every distinct token a registry can emit.

use std::collections::BTreeSet;

use crate::registry::Registry;

/// Collects every non-empty token from base lists and axis options,
/// deduplicated and sorted.
pub fn collect_classes(registry: &Registry) -> Vec<String> {
    let classes: BTreeSet<&str> = registry
        .iter()
        .flat_map(|entry| entry.definition.all_tokens())
        .filter(|token| !token.is_empty())
        .collect();
    classes.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{Axis, VariantDefinition};

    #[test]
    fn test_collect_classes() {
        let registry = Registry::new()
            .with(
                "button",
                "buttonStyleVariants",
                VariantDefinition::new()
                    .with_base(["inline-flex", "items-center", ""])
                    .with_axis(
                        "variant",
                        Axis::new()
                            .with_option("primary", ["bg-primary", "text-primary-foreground"])
                            .with_option("ghost", ["bg-transparent"]),
                    ),
            )
            .with(
                "badge",
                "badgeStyleVariants",
                VariantDefinition::new().with_base(["inline-flex", "font-semibold"]),
            );

        assert_eq!(
            collect_classes(&registry),
            vec![
                "bg-primary",
                "bg-transparent",
                "font-semibold",
                "inline-flex",
                "items-center",
                "text-primary-foreground",
            ]
        );
    }

    #[test]
    fn test_collect_classes_empty() {
        assert!(collect_classes(&Registry::new()).is_empty());
    }
}
