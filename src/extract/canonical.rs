//! Canonical names for schema keys and URL templates.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::{CATCH_ALL_SCHEMA, UNSUPPORTED_ENTITIES};
use crate::utils::compile_regex_unsafe;

const PATH_VARIABLE_PATTERN: &str = r"/(:\w+)";
const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

static PATH_VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(PATH_VARIABLE_PATTERN, "PATH_VARIABLE_RE"));
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(IDENTIFIER_PATTERN, "IDENTIFIER_RE"));

/// Normalizes a free-text name into a key usable both as a map key and as a
/// `$ref` path segment.
///
/// Strips surrounding whitespace, drops colons and periods, and turns spaces
/// into underscores. Entity names listed in [`UNSUPPORTED_ENTITIES`] are
/// redirected to the catch-all schema.
///
/// The result is a fixed point: `canonicalize(canonicalize(x)) == canonicalize(x)`.
pub fn canonicalize(text: &str) -> String {
    let canonical = text
        .trim()
        .replace(':', "")
        .replace(' ', "_")
        .replace('.', "");

    if UNSUPPORTED_ENTITIES.contains(&canonical.as_str()) {
        log::warn!("{} is not supported yet, using {}", canonical, CATCH_ALL_SCHEMA);
        return CATCH_ALL_SCHEMA.to_string();
    }

    canonical
}

/// Whether a canonical name can stand as a component name on its own.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_RE.is_match(name)
}

/// Rewrites colon-style path variables to brace style: `/:id` → `/{:id}`.
///
/// Applying it twice is a no-op since `/{:id}` no longer starts a segment with `:`.
pub fn canonicalize_path(path: &str) -> String {
    PATH_VARIABLE_RE.replace_all(path, "/{$1}").into_owned()
}
