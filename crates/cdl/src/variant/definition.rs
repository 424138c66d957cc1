//! Variant definitions: base tokens, named axes and default selections.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered list of utility-class tokens.
pub type Tokens = Vec<String>;

fn collect_tokens<I, T>(tokens: I) -> Tokens
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    tokens.into_iter().map(Into::into).collect()
}

/// One style dimension: option names mapped to token lists.
///
/// Options keep the order they were added in. An option may map to an empty
/// token list, which resolves to nothing but is still a valid choice.
///
/// # Example
///
/// ```rust
/// use cdl::Axis;
///
/// let size = Axis::new()
///     .with_option("sm", ["h-8"])
///     .with_option("md", ["h-10"]);
///
/// assert_eq!(size.get("sm"), Some(&["h-8".to_string()][..]));
/// assert_eq!(size.sorted_option_names(), vec!["md", "sm"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Axis {
    options: IndexMap<String, Tokens>,
}

impl Axis {
    /// Creates an axis with no options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option, returning the axis for chaining.
    ///
    /// Re-adding an existing option name replaces its tokens in place.
    pub fn with_option<I, T>(mut self, name: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.insert(name, tokens);
        self
    }

    /// Adds or replaces an option.
    pub fn insert<I, T>(&mut self, name: impl Into<String>, tokens: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.options.insert(name.into(), collect_tokens(tokens));
    }

    /// Returns the tokens of an option, or `None` if the axis lacks it.
    pub fn get(&self, option: &str) -> Option<&[String]> {
        self.options.get(option).map(Vec::as_slice)
    }

    /// Returns true if the axis defines `option`.
    pub fn has(&self, option: &str) -> bool {
        self.options.contains_key(option)
    }

    /// Iterates options in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.options
            .iter()
            .map(|(name, tokens)| (name.as_str(), tokens.as_slice()))
    }

    /// Returns option names in definition order.
    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    /// Returns option names sorted lexicographically.
    pub fn sorted_option_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.options.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns true if the axis has no options.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl<K, I, T> FromIterator<(K, I)> for Axis
where
    K: Into<String>,
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    fn from_iter<It: IntoIterator<Item = (K, I)>>(iter: It) -> Self {
        let mut axis = Axis::new();
        for (name, tokens) in iter {
            axis.insert(name, tokens);
        }
        axis
    }
}

/// The unit of style composition.
///
/// A definition always emits its `base` tokens, then one option's tokens
/// per axis, in the order the axes were added. `defaults` supply the option
/// for axes the caller leaves unselected.
///
/// The serialized form matches the registry snapshot: `base`, `variants`,
/// `defaultVariants` and an optional `source`.
///
/// # Example
///
/// ```rust
/// use cdl::{Axis, ResolveOptions, Selection, VariantDefinition};
///
/// let button = VariantDefinition::new()
///     .with_base(["inline-flex"])
///     .with_axis("size", Axis::new().with_option("sm", ["h-8"]).with_option("md", ["h-10"]))
///     .with_default("size", "md");
///
/// let classes = button
///     .resolve(&Selection::new(), ResolveOptions::default())
///     .unwrap();
/// assert_eq!(classes, "inline-flex h-10");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDefinition {
    #[serde(default)]
    base: Tokens,
    #[serde(default, rename = "variants")]
    axes: IndexMap<String, Axis>,
    #[serde(default, rename = "defaultVariants")]
    defaults: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl VariantDefinition {
    /// Creates an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base tokens.
    pub fn with_base<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.base = collect_tokens(tokens);
        self
    }

    /// Adds an axis after the existing ones.
    ///
    /// Re-adding an axis name replaces it without changing its position.
    pub fn with_axis(mut self, name: impl Into<String>, axis: Axis) -> Self {
        self.insert_axis(name, axis);
        self
    }

    /// Sets the default option of an axis.
    pub fn with_default(mut self, axis: impl Into<String>, option: impl Into<String>) -> Self {
        self.defaults.insert(axis.into(), option.into());
        self
    }

    /// Records where the definition was harvested from.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds or replaces an axis.
    pub fn insert_axis(&mut self, name: impl Into<String>, axis: Axis) {
        self.axes.insert(name.into(), axis);
    }

    /// Returns the base tokens.
    pub fn base(&self) -> &[String] {
        &self.base
    }

    /// Iterates axes in definition order.
    pub fn axes(&self) -> impl Iterator<Item = (&str, &Axis)> {
        self.axes.iter().map(|(name, axis)| (name.as_str(), axis))
    }

    /// Looks up an axis by name.
    pub fn axis(&self, name: &str) -> Option<&Axis> {
        self.axes.get(name)
    }

    /// Number of axes.
    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    /// Returns the default option for an axis, if one is declared.
    pub fn default_option(&self, axis: &str) -> Option<&str> {
        self.defaults.get(axis).map(String::as_str)
    }

    /// Iterates declared defaults.
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &str)> {
        self.defaults.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Provenance of the definition, if recorded.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns every token of the definition: base first, then each axis's
    /// options in order. Duplicates are kept.
    pub fn all_tokens(&self) -> impl Iterator<Item = &str> {
        self.base.iter().map(String::as_str).chain(
            self.axes
                .values()
                .flat_map(|axis| axis.options.values().flatten().map(String::as_str)),
        )
    }

    /// Returns defaults that name an option their axis does not define.
    ///
    /// Such defaults are tolerated when loading but fail strict resolution.
    pub fn dangling_defaults(&self) -> Vec<(&str, &str)> {
        self.defaults()
            .filter(|(axis, option)| {
                !option.is_empty() && self.axis(axis).is_some_and(|a| !a.has(option))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> VariantDefinition {
        VariantDefinition::new()
            .with_base(["inline-flex"])
            .with_axis(
                "size",
                Axis::new().with_option("sm", ["h-8"]).with_option("md", ["h-10"]),
            )
            .with_axis(
                "variant",
                Axis::new().with_option("primary", ["bg-primary", "text-primary-foreground"]),
            )
            .with_default("size", "md")
            .with_default("variant", "primary")
    }

    // =========================================================================
    // Axis tests
    // =========================================================================

    #[test]
    fn test_axis_keeps_insertion_order() {
        let axis = Axis::new()
            .with_option("zeta", ["z-10"])
            .with_option("alpha", ["z-0"]);
        let names: Vec<&str> = axis.option_names().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(axis.sorted_option_names(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_axis_replace_option() {
        let axis = Axis::new()
            .with_option("sm", ["h-8"])
            .with_option("sm", ["h-7"]);
        assert_eq!(axis.len(), 1);
        assert_eq!(axis.get("sm"), Some(&["h-7".to_string()][..]));
    }

    #[test]
    fn test_axis_empty_option_is_defined() {
        let axis = Axis::new().with_option("none", Vec::<String>::new());
        assert!(axis.has("none"));
        assert_eq!(axis.get("none"), Some(&[] as &[String]));
        assert_eq!(axis.get("other"), None);
    }

    #[test]
    fn test_axis_from_iter() {
        let axis: Axis = vec![("a", vec!["x"]), ("b", vec!["y", "z"])]
            .into_iter()
            .collect();
        assert_eq!(axis.len(), 2);
        assert_eq!(axis.get("b").map(<[String]>::len), Some(2));
    }

    // =========================================================================
    // VariantDefinition tests
    // =========================================================================

    #[test]
    fn test_definition_accessors() {
        let def = button();
        assert_eq!(def.base(), &["inline-flex".to_string()]);
        assert_eq!(def.axis_count(), 2);
        assert_eq!(def.default_option("size"), Some("md"));
        assert_eq!(def.default_option("tone"), None);
        assert!(def.source().is_none());

        let axes: Vec<&str> = def.axes().map(|(name, _)| name).collect();
        assert_eq!(axes, vec!["size", "variant"]);
    }

    #[test]
    fn test_definition_replacing_axis_keeps_position() {
        let def = button().with_axis("size", Axis::new().with_option("lg", ["h-12"]));
        let axes: Vec<&str> = def.axes().map(|(name, _)| name).collect();
        assert_eq!(axes, vec!["size", "variant"]);
        assert!(def.axis("size").is_some_and(|a| a.has("lg")));
    }

    #[test]
    fn test_definition_all_tokens() {
        let def = button();
        let tokens: Vec<&str> = def.all_tokens().collect();
        assert_eq!(
            tokens,
            vec![
                "inline-flex",
                "h-8",
                "h-10",
                "bg-primary",
                "text-primary-foreground"
            ]
        );
    }

    #[test]
    fn test_definition_dangling_defaults() {
        let def = button().with_default("size", "xl").with_default("ghost", "on");
        assert_eq!(def.dangling_defaults(), vec![("size", "xl")]);
        assert!(button().dangling_defaults().is_empty());
    }

    #[test]
    fn test_definition_serializes_snapshot_shape() {
        let def = button().with_source("src/variants/button.ts");
        let json = serde_json::to_value(&def).unwrap();

        assert_eq!(json["base"], serde_json::json!(["inline-flex"]));
        assert_eq!(json["variants"]["size"]["sm"], serde_json::json!(["h-8"]));
        assert_eq!(json["defaultVariants"]["variant"], "primary");
        assert_eq!(json["source"], "src/variants/button.ts");
    }

    #[test]
    fn test_definition_deserializes_with_missing_sections() {
        let def: VariantDefinition =
            serde_json::from_str(r#"{ "variants": { "size": { "sm": ["h-8"] } } }"#).unwrap();
        assert!(def.base().is_empty());
        assert_eq!(def.default_option("size"), None);
        assert!(def.axis("size").is_some());
    }
}
