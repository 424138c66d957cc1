//! Resolution of a definition and a selection into a class string.
//!
//! The algorithm is deterministic and order-preserving:
//!
//! 1. Start with the definition's base tokens.
//! 2. Walk the axes in definition order.
//! 3. Pick the selected option, falling back to the axis default. Axes with
//!    neither are skipped.
//! 4. Append the option's tokens, or handle an unknown option according to
//!    [`ResolveOptions::strict`].
//! 5. Join everything with single spaces.
//!
//! Selection entries for axes the definition does not have are ignored.

use tracing::trace;

use crate::error::{CdlError, Result};
use crate::variant::{Selection, VariantDefinition};

/// Options controlling resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Fail on options an axis does not define. When false, such axes
    /// contribute no tokens.
    pub strict: bool,
}

impl ResolveOptions {
    /// Strict resolution (the default).
    pub const STRICT: ResolveOptions = ResolveOptions { strict: true };
    /// Lenient resolution that skips unknown options.
    pub const LENIENT: ResolveOptions = ResolveOptions { strict: false };
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self::STRICT
    }
}

/// Resolves `definition` under `selection` into a space-separated class string.
///
/// # Errors
///
/// Returns [`CdlError::UnknownVariantOption`] in strict mode when the chosen
/// option (selected or defaulted) is not defined by its axis.
///
/// # Example
///
/// ```rust
/// use cdl::{resolve, Axis, ResolveOptions, Selection, VariantDefinition};
///
/// let def = VariantDefinition::new()
///     .with_axis("size", Axis::new().with_option("sm", ["h-8"]))
///     .with_default("size", "sm");
///
/// let err = resolve(&def, &Selection::from([("size", "xxl")]), ResolveOptions::STRICT)
///     .unwrap_err();
/// assert_eq!(err.to_string(), "Unknown variant option: size=xxl. Known: sm");
///
/// let lenient = resolve(&def, &Selection::from([("size", "xxl")]), ResolveOptions::LENIENT);
/// assert_eq!(lenient.unwrap(), "");
/// ```
pub fn resolve(
    definition: &VariantDefinition,
    selection: &Selection,
    options: ResolveOptions,
) -> Result<String> {
    let mut out: Vec<&str> = definition.base().iter().map(String::as_str).collect();

    for (axis_name, axis) in definition.axes() {
        let chosen = selection
            .get(axis_name)
            .or_else(|| definition.default_option(axis_name))
            .filter(|option| !option.is_empty());

        let Some(chosen) = chosen else {
            continue;
        };

        match axis.get(chosen) {
            Some(tokens) => out.extend(tokens.iter().map(String::as_str)),
            None if options.strict => {
                return Err(CdlError::UnknownVariantOption {
                    axis: axis_name.to_string(),
                    chosen: chosen.to_string(),
                    known: axis.sorted_option_names(),
                });
            }
            None => {
                trace!(axis = axis_name, option = chosen, "skipping unknown option");
            }
        }
    }

    Ok(out.join(" ").trim().to_string())
}

impl VariantDefinition {
    /// Resolves this definition; see [`resolve`].
    pub fn resolve(&self, selection: &Selection, options: ResolveOptions) -> Result<String> {
        resolve(self, selection, options)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::variant::Axis;
    use proptest::prelude::*;

    fn token() -> impl Strategy<Value = String> {
        "[a-z]{1,6}(-[a-z0-9]{1,4})?"
    }

    fn definition() -> impl Strategy<Value = VariantDefinition> {
        let axis = prop::collection::vec(
            ("[a-z]{1,5}", prop::collection::vec(token(), 0..4)),
            1..4,
        );
        (
            prop::collection::vec(token(), 0..3),
            prop::collection::vec(("[a-z]{1,6}", axis, any::<bool>()), 0..4),
        )
            .prop_map(|(base, axes)| {
                let mut def = VariantDefinition::new().with_base(base);
                for (name, options, with_default) in axes {
                    if def.axis(&name).is_some() {
                        continue;
                    }
                    let first = options[0].0.clone();
                    def = def.with_axis(name.clone(), options.into_iter().collect::<Axis>());
                    if with_default {
                        def = def.with_default(name, first);
                    }
                }
                def
            })
    }

    /// Expected output built directly from the stored order.
    fn expected(def: &VariantDefinition, selection: &Selection) -> String {
        let mut tokens: Vec<String> = def.base().to_vec();
        for (name, axis) in def.axes() {
            let chosen = selection.get(name).or_else(|| def.default_option(name));
            if let Some(found) = chosen.and_then(|c| axis.get(c)) {
                tokens.extend(found.iter().cloned());
            }
        }
        tokens.join(" ")
    }

    proptest! {
        #[test]
        fn resolve_is_deterministic(def in definition()) {
            let selection = Selection::new();
            let first = resolve(&def, &selection, ResolveOptions::STRICT).unwrap();
            let second = resolve(&def, &selection, ResolveOptions::STRICT).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn omitted_axes_equal_explicit_defaults(def in definition()) {
            let explicit: Selection = def
                .defaults()
                .map(|(axis, option)| (axis.to_string(), option.to_string()))
                .collect();

            let implicit = resolve(&def, &Selection::new(), ResolveOptions::STRICT).unwrap();
            let spelled_out = resolve(&def, &explicit, ResolveOptions::STRICT).unwrap();
            prop_assert_eq!(implicit, spelled_out);
        }

        #[test]
        fn output_preserves_definition_order(def in definition(), pick in any::<prop::sample::Index>()) {
            // Select one valid option on every axis.
            let selection: Selection = def
                .axes()
                .map(|(name, axis)| {
                    let names: Vec<&str> = axis.option_names().collect();
                    (name.to_string(), pick.get(&names).to_string())
                })
                .collect();

            let out = resolve(&def, &selection, ResolveOptions::STRICT).unwrap();
            prop_assert_eq!(out, expected(&def, &selection));
        }

        #[test]
        fn lenient_unknown_option_drops_only_that_axis(def in definition()) {
            prop_assume!(def.axis_count() > 0);
            let (axis_name, axis) = def.axes().next().map(|(n, a)| (n.to_string(), a.clone())).unwrap();
            let bogus = "NOT-AN-OPTION";

            let strict = resolve(&def, &Selection::from([(axis_name.as_str(), bogus)]), ResolveOptions::STRICT);
            let err = strict.unwrap_err().to_string();
            prop_assert!(err.contains(&axis_name));
            prop_assert!(err.contains(bogus));
            prop_assert!(err.contains(&axis.sorted_option_names().join(", ")));

            let lenient = resolve(&def, &Selection::from([(axis_name.as_str(), bogus)]), ResolveOptions::LENIENT);
            prop_assert!(lenient.is_ok());
        }
    }
}
