//! Extraction pipeline: documentation HTML → paths and named schemas.
//!
//! Leaf first:
//! - [`canonical`]: identifier-safe names and URL templates
//! - [`types`]: type prose → schema node or reference, with the
//!   [`irregular`] phrase table checked first
//! - [`attributes`]: attribute marker scanning and parameter lists
//! - [`components`]: entity pages → named object schemas
//! - [`paths`]: method-group pages → operations
//! - [`registry`]: component registration and reference linking
//!
//! Pages are flattened by [`blocks`] before any of the page-level extractors
//! look at them.

pub mod attributes;
pub mod blocks;
pub mod canonical;
pub mod components;
pub mod index;
pub mod irregular;
pub mod paths;
pub mod registry;
pub mod types;

pub use canonical::{canonicalize, canonicalize_path};
pub use components::extract_components;
pub use index::{discover_links, DocLink};
pub use paths::extract_paths;
pub use registry::{ComponentRegistry, LinkedComponents};
pub use types::resolve_type;

#[cfg(test)]
mod tests;
