//! UNTP Object Editing
//!
//! Structural edit primitives over generic JSON trees, used by every
//! credential migration.
//!
//! # Core Concepts
//!
//! - [`rename_key_preserving_order`]: rename a key without moving it
//! - [`strip_fields`]: drop named fields from an object or from each object in an array
//! - [`flatten_into`]: merge a nested object into its parent (nested values win)
//! - [`shape`]: located probes that turn a wrong JSON shape into a [`ShapeError`]
//!
//! Maps keep insertion order (`serde_json` is built with `preserve_order`), so
//! a migrated document diffs cleanly against its source.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use untp_object::rename_key_preserving_order;
//!
//! let mut value = json!({"a": 1, "b": 2, "c": 3});
//! let map = value.as_object_mut().unwrap();
//! rename_key_preserving_order(map, "b", "x");
//!
//! let keys: Vec<&str> = map.keys().map(String::as_str).collect();
//! assert_eq!(keys, ["a", "x", "c"]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod editor;
mod error;
pub mod shape;

// Re-exports
pub use editor::{flatten_into, rename_key_preserving_order, strip_fields};
pub use error::{type_name, ShapeError};

/// JSON object type used throughout the workspace
pub type Object = serde_json::Map<String, serde_json::Value>;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
