//! CDL variant compiler.
//!
//! A component's visual variants are declared as data: base tokens, named
//! axes of options, and per-axis defaults. This crate turns a definition and
//! a runtime selection into a deterministic, space-separated class string,
//! and derives offline reports from a whole registry of definitions.
//!
//! # Modules
//!
//! - [`variant`] - [`VariantDefinition`], [`Axis`] and [`Selection`]
//! - [`resolve()`] - definition + selection -> class string
//! - [`Registry`] - two-level namespace/name lookup of definitions
//! - [`snapshot`] - loading and writing the on-disk registry
//! - [`report`] - token classification, whitelist table, class list,
//!   revision report and the JSON artifacts they produce
//! - [`lint`] - tokens carrying modifiers or arbitrary values
//! - [`utility`] - utility props checked against the whitelist
//! - [`cache`] - memoized resolution over a shared registry
//!
//! # Example
//!
//! ```rust
//! use cdl::{Axis, Registry, ResolveOptions, Selection, VariantDefinition};
//!
//! let registry = Registry::new().with(
//!     "badge",
//!     "badgeSizeVariants",
//!     VariantDefinition::new()
//!         .with_axis(
//!             "size",
//!             Axis::new()
//!                 .with_option("sm", ["px-2", "py-0.5", "text-xs"])
//!                 .with_option("lg", ["px-3", "py-1", "text-sm"]),
//!         )
//!         .with_default("size", "sm"),
//! );
//!
//! let lg = registry
//!     .resolve("badge", "badgeSizeVariants", &Selection::from([("size", "lg")]), ResolveOptions::STRICT)
//!     .unwrap();
//! assert_eq!(lg, "px-3 py-1 text-sm");
//! ```
//!
//! # Errors
//!
//! Everything fallible returns [`Result`] with a [`CdlError`]. Missing
//! definitions and unknown options in strict mode are authoring bugs and are
//! meant to propagate.

pub mod cache;
mod error;
mod io;
pub mod lint;
mod registry;
pub mod report;
mod resolve;
pub mod snapshot;
pub mod utility;
pub mod variant;

pub use error::{CdlError, Result};
pub use registry::{DefinitionEntry, Registry};
pub use resolve::{resolve, ResolveOptions};
pub use variant::{Axis, Selection, Tokens, VariantDefinition};
