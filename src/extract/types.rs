//! Type resolution: free-text type prose → schema node or reference.
//!
//! Resolution order:
//! 1. the irregular-phrase table (exact match)
//! 2. `Array of X` / `List of X`, recursing on `X`
//! 3. the primitive set {boolean, integer, number, string}
//! 4. a reference to the named entity `canonicalize(text)`
//!
//! References are emitted by name only. Whether the name exists is checked
//! once every entity has been registered (see the linker).

use regex::Regex;
use std::sync::LazyLock;

use super::canonical::{canonicalize, is_identifier};
use super::irregular::lookup_phrase;
use crate::config::CATCH_ALL_SCHEMA;
use crate::error_handling::ParseError;
use crate::openapi::{DataType, Reference, Schema, SchemaOrRef, TypeSet};
use crate::utils::{collapse_whitespace, compile_regex_unsafe};

const ARRAY_OF_PATTERN: &str = r"^(?:Array|List) of ([\w:]+)";

static ARRAY_OF_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(ARRAY_OF_PATTERN, "ARRAY_OF_RE"));

/// Resolves type prose into a schema node.
///
/// `description` is attached to the node built (as a local override on
/// references). `nullable` pairs primitives and arrays with `null`, and wraps
/// references in `oneOf[$ref, {type: null}]`.
///
/// # Errors
///
/// Returns `ParseError::UnresolvableType` when the prose is empty.
pub fn resolve_type(
    text: &str,
    description: Option<&str>,
    nullable: bool,
) -> Result<SchemaOrRef, ParseError> {
    let text = collapse_whitespace(text);
    let description = description.map(str::to_string);

    if let Some(shape) = lookup_phrase(&text) {
        log::debug!("resolved irregular phrase {:?} as {:?}", text, shape);
        return Ok(shape.build(&text));
    }

    if let Some(captures) = ARRAY_OF_RE.captures(&text) {
        let items = resolve_type(singular(&captures[1]), None, false)?;
        return Ok(Schema::array(items, nullable)
            .with_description(description)
            .into());
    }

    if let Some(data_type) = DataType::primitive(&text) {
        return Ok(Schema::primitive(data_type, nullable)
            .with_description(description)
            .into());
    }

    if text.is_empty() {
        return Err(ParseError::UnresolvableType { text });
    }
    let name = reference_name(&text);

    let reference = Reference::schema(&name);
    if nullable {
        Ok(Schema::one_of(vec![
            reference.into(),
            Schema {
                schema_type: Some(TypeSet::Single(DataType::Null)),
                ..Default::default()
            }
            .into(),
        ])
        .with_description(description)
        .into())
    } else {
        Ok(reference.with_description(description).into())
    }
}

/// Canonical entity name for free prose. Characters that cannot appear in a
/// component name are dropped; prose with nothing usable left points at the
/// catch-all schema.
fn reference_name(text: &str) -> String {
    let canonical = canonicalize(text);
    if is_identifier(&canonical) {
        return canonical;
    }
    let stripped: String = canonical
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if is_identifier(&stripped) {
        log::debug!("type {:?} referenced as {}", text, stripped);
        stripped
    } else {
        log::warn!("type {:?} names no entity, using {}", text, CATCH_ALL_SCHEMA);
        CATCH_ALL_SCHEMA.to_string()
    }
}

/// "Strings" → "String" when the singular is a primitive; other words are kept.
fn singular(word: &str) -> &str {
    match word.strip_suffix('s') {
        Some(stem) if DataType::primitive(stem).is_some() => stem,
        _ => word,
    }
}
