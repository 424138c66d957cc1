//! Caller-supplied option choices for a single resolution.

use indexmap::IndexMap;

/// A runtime mapping of axis name to chosen option.
///
/// An axis may be recorded as absent (`None`) or with an empty option; both
/// fall back to the definition's default when resolving. Option names are
/// plain strings even when they read as booleans (`"true"`, `"false"`).
///
/// # Example
///
/// ```rust
/// use cdl::Selection;
///
/// let selection = Selection::new().with("size", "sm").without("variant");
/// assert_eq!(selection.get("size"), Some("sm"));
/// assert_eq!(selection.get("variant"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    choices: IndexMap<String, Option<String>>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses an option for an axis, returning the selection for chaining.
    pub fn with(mut self, axis: impl Into<String>, option: impl Into<String>) -> Self {
        self.set(axis, option);
        self
    }

    /// Records an axis as explicitly absent.
    pub fn without(mut self, axis: impl Into<String>) -> Self {
        self.choices.insert(axis.into(), None);
        self
    }

    /// Chooses an option for an axis.
    pub fn set(&mut self, axis: impl Into<String>, option: impl Into<String>) {
        self.choices.insert(axis.into(), Some(option.into()));
    }

    /// Returns the chosen option, ignoring absent and empty entries.
    pub fn get(&self, axis: &str) -> Option<&str> {
        self.choices
            .get(axis)
            .and_then(|option| option.as_deref())
            .filter(|option| !option.is_empty())
    }

    /// Iterates the effective choices in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.choices.iter().filter_map(|(axis, option)| match option {
            Some(option) if !option.is_empty() => Some((axis.as_str(), option.as_str())),
            _ => None,
        })
    }

    /// Number of recorded entries, absent ones included.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Effective choices as owned pairs, sorted by axis.
    ///
    /// Two selections with the same effective choices share a key regardless
    /// of insertion order or absent entries.
    pub fn cache_key(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .iter()
            .map(|(axis, option)| (axis.to_string(), option.to_string()))
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

impl<K, V> FromIterator<(K, V)> for Selection
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for (axis, option) in iter {
            selection.set(axis, option);
        }
        selection
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Selection
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
