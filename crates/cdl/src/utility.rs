//! Utility props: prefix-keyed shorthands checked against the whitelist.
//!
//! A utility prop is a `(prefix, value)` pair such as `p = "4"` that expands
//! to the class `p-4`, using the same reconstruction rule as the whitelist
//! table. Flag values expand to the bare prefix (`block = true` -> `block`).
//!
//! Two expanders are provided:
//!
//! - [`UtilityProps::validated`] emits a class only when the table allows
//!   the pair, silently dropping everything else.
//! - [`unvalidated`] trusts its input and never consults a table. It is for
//!   callers whose props were already checked upstream.
//!
//! [`UtilityProps::split`] separates utility-prop keys from any other props
//! so the remainder can be passed through untouched.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::report::{reconstruct, WhitelistTable};

/// Sentinel value some tables carry for prefixes that were rejected.
pub(crate) const INVALID_VALUE: &str = "__INVALID__";

/// The value given to one utility prop.
#[derive(Debug, Clone, PartialEq)]
pub enum UtilityValue {
    /// A value string; `""` selects the bare prefix.
    Text(String),
    /// `true` selects the bare prefix, `false` emits nothing.
    Flag(bool),
    /// No value; emits nothing.
    Absent,
}

impl UtilityValue {
    /// The value as it appears after the prefix, or `None` if nothing
    /// should be emitted.
    fn as_value(&self) -> Option<&str> {
        match self {
            UtilityValue::Text(text) => Some(text.as_str()),
            UtilityValue::Flag(true) => Some(""),
            UtilityValue::Flag(false) | UtilityValue::Absent => None,
        }
    }
}

impl fmt::Display for UtilityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilityValue::Text(text) => f.write_str(text),
            UtilityValue::Flag(flag) => write!(f, "{flag}"),
            UtilityValue::Absent => Ok(()),
        }
    }
}

impl From<&str> for UtilityValue {
    fn from(text: &str) -> Self {
        UtilityValue::Text(text.to_string())
    }
}

impl From<String> for UtilityValue {
    fn from(text: String) -> Self {
        UtilityValue::Text(text)
    }
}

impl From<bool> for UtilityValue {
    fn from(flag: bool) -> Self {
        UtilityValue::Flag(flag)
    }
}

macro_rules! numeric_utility_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for UtilityValue {
                fn from(n: $ty) -> Self {
                    UtilityValue::Text(n.to_string())
                }
            }
        )*
    };
}

numeric_utility_value!(i32, i64, u32, u64, usize, f64);

impl<T: Into<UtilityValue>> From<Option<T>> for UtilityValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(UtilityValue::Absent, Into::into)
    }
}

/// Expands props into classes without consulting a whitelist.
///
/// Text values are trimmed; an empty value emits the bare prefix.
///
/// ```rust
/// use cdl::utility::{unvalidated, UtilityValue};
///
/// let classes = unvalidated([
///     ("p", UtilityValue::from("4")),
///     ("row", "start-1".into()),
///     ("block", true.into()),
/// ]);
/// assert_eq!(classes, "p-4 row-start-1 block");
/// ```
pub fn unvalidated<K, V>(props: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: Into<UtilityValue>,
{
    let mut classes: Vec<String> = Vec::new();
    for (prefix, value) in props {
        let value = value.into();
        if let Some(value) = value.as_value() {
            classes.push(reconstruct(prefix.as_ref(), value.trim()));
        }
    }
    classes.join(" ")
}

/// Props separated by [`UtilityProps::split`].
#[derive(Debug, Clone, PartialEq)]
pub struct SplitProps<V> {
    /// Props whose key is a known prefix.
    pub utility: IndexMap<String, V>,
    /// Everything else, in input order.
    pub rest: IndexMap<String, V>,
}

impl<V> Default for SplitProps<V> {
    fn default() -> Self {
        Self {
            utility: IndexMap::new(),
            rest: IndexMap::new(),
        }
    }
}

/// Allowed values per prefix, sorted.
///
/// # Example
///
/// ```rust
/// use cdl::report::WhitelistTable;
/// use cdl::utility::UtilityProps;
///
/// let props = UtilityProps::from_table(&WhitelistTable::from_tokens(["p-4", "block"]));
///
/// assert_eq!(props.validated([("p", "4"), ("p", "5")]), "p-4");
/// assert_eq!(props.validated([("block", true)]), "block");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtilityProps {
    prefixes: BTreeMap<String, Vec<String>>,
}

impl UtilityProps {
    /// Derives the map from a whitelist table, dropping the `__INVALID__`
    /// sentinel.
    pub fn from_table(table: &WhitelistTable) -> Self {
        let prefixes = table
            .iter()
            .map(|(prefix, entry)| {
                let values: BTreeSet<String> = entry
                    .values
                    .iter()
                    .filter(|value| value.as_str() != INVALID_VALUE)
                    .cloned()
                    .collect();
                (prefix.to_string(), values.into_iter().collect())
            })
            .collect();
        Self { prefixes }
    }

    /// Returns true if `prefix` is a utility prop.
    pub fn is_prefix(&self, prefix: &str) -> bool {
        self.prefixes.contains_key(prefix)
    }

    /// Returns true if `prefix` accepts `value`.
    pub fn allows(&self, prefix: &str, value: &str) -> bool {
        self.prefixes
            .get(prefix)
            .is_some_and(|values| values.iter().any(|v| v == value))
    }

    /// Allowed values for a prefix.
    pub fn values(&self, prefix: &str) -> Option<&[String]> {
        self.prefixes.get(prefix).map(Vec::as_slice)
    }

    /// Iterates prefixes with their values, sorted by prefix.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.prefixes
            .iter()
            .map(|(prefix, values)| (prefix.as_str(), values.as_slice()))
    }

    /// Number of prefixes.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Returns true if there are no prefixes.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Expands props into classes, keeping only whitelisted pairs.
    ///
    /// Text values are used verbatim. `true` emits the bare prefix only when
    /// `""` is allowed for it. Absent values emit nothing, even where `""` is
    /// allowed; pass `""` or `true` to ask for the bare prefix.
    pub fn validated<K, V>(&self, props: impl IntoIterator<Item = (K, V)>) -> String
    where
        K: AsRef<str>,
        V: Into<UtilityValue>,
    {
        let mut classes: Vec<String> = Vec::new();
        for (prefix, value) in props {
            let prefix = prefix.as_ref();
            let value = value.into();
            match value.as_value() {
                Some(value) if self.allows(prefix, value) => {
                    classes.push(reconstruct(prefix, value));
                }
                _ => {}
            }
        }
        classes.join(" ")
    }

    /// Separates props whose key is a known prefix from the rest.
    ///
    /// Values are not checked.
    pub fn split<K, V>(&self, props: impl IntoIterator<Item = (K, V)>) -> SplitProps<V>
    where
        K: Into<String>,
    {
        let mut split = SplitProps::default();
        for (key, value) in props {
            let key = key.into();
            if self.is_prefix(&key) {
                split.utility.insert(key, value);
            } else {
                split.rest.insert(key, value);
            }
        }
        split
    }

    /// Splits props and expands the utility part with [`unvalidated`].
    pub fn resolve_class_name<K, V>(
        &self,
        props: impl IntoIterator<Item = (K, V)>,
    ) -> (String, IndexMap<String, V>)
    where
        K: Into<String>,
        V: Clone + Into<UtilityValue>,
    {
        let split = self.split(props);
        let classes = unvalidated(split.utility.iter().map(|(k, v)| (k, v.clone())));
        (classes, split.rest)
    }
}

impl From<BTreeMap<String, Vec<String>>> for UtilityProps {
    fn from(prefixes: BTreeMap<String, Vec<String>>) -> Self {
        Self { prefixes }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn validated_only_emits_whitelisted_tokens(
            tokens in prop::collection::vec("[a-z]{1,4}(-[a-z0-9]{1,3})?", 1..20),
            bag in prop::collection::vec(("[a-z]{1,4}", "([a-z0-9]{1,3})?"), 0..20),
        ) {
            let table = WhitelistTable::from_tokens(tokens.iter().map(String::as_str));
            let props = UtilityProps::from_table(&table);
            let whitelisted: BTreeSet<String> = table.tokens().collect();

            let classes = props.validated(bag.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            for class in classes.split_whitespace() {
                prop_assert!(whitelisted.contains(class), "{} not whitelisted", class);
            }
        }
    }
}
