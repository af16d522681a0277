//! Utility functions shared by the extractors.
//!
//! This module provides:
//! - CSS selector and regex compilation utilities
//! - Text normalization of rendered prose

mod pattern;
mod selector;
mod text;

pub use pattern::compile_regex_unsafe;
pub use selector::parse_selector_unsafe;
pub use text::{collapse_whitespace, element_text, has_class};
