//! The CDL variant model.
//!
//! - [`VariantDefinition`]: base tokens, ordered axes and defaults
//! - [`Axis`]: option names mapped to token lists
//! - [`Selection`]: the caller's choice of option per axis
//!
//! Axes are uniform string-keyed data; there is no per-axis type. Order is
//! significant everywhere: base tokens, axes and each option's tokens are
//! emitted exactly as stored.

mod definition;
mod selection;

pub use definition::{Axis, Tokens, VariantDefinition};
pub use selection::Selection;
