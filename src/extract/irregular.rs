//! Hand-curated shapes for documentation prose that does not follow the
//! general type grammar.
//!
//! These are data, not rules: a new irregularity in the docs is a new table
//! row. Lookups are exact matches on whitespace-collapsed prose.

use std::collections::BTreeMap;

use crate::config::{CATCH_ALL_SCHEMA, HASH_SCHEMA};
use crate::openapi::{DataType, Reference, Response, Schema, SchemaOrRef};

/// Shape substituted for an irregular `Returns:` phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrregularShape {
    /// Plain string, described by the phrase itself.
    String,
    /// Reference to a named schema.
    Ref(&'static str),
    /// Object without a declared shape, described by the phrase.
    Object,
    /// Object whose properties are all integers.
    IntegerRecord(&'static [&'static str]),
    /// Exactly one of the named schemas.
    OneOf(&'static [&'static str]),
}

/// Irregular `Returns:` phrases and the shape each one stands for.
pub const IRREGULAR_PHRASES: &[(&str, IrregularShape)] = &[
    ("String (URL) or HTML response", IrregularShape::String),
    ("Preferences by key and value", IrregularShape::Ref(CATCH_ALL_SCHEMA)),
    (
        "the user\u{2019}s own Account with source attribute",
        IrregularShape::Ref("Account"),
    ),
    ("MediaAttachment, but without a URL", IrregularShape::Ref("MediaAttachment")),
    ("Hash of timeline key and associated Marker", IrregularShape::Object),
    ("Hash with a single key of count", IrregularShape::IntegerRecord(&["count"])),
    ("JSON as per the above description", IrregularShape::Ref(CATCH_ALL_SCHEMA)),
    ("OEmbed metadata", IrregularShape::Ref(CATCH_ALL_SCHEMA)),
    (
        "Object with source language codes as keys and arrays of target language codes as values.",
        IrregularShape::Ref(CATCH_ALL_SCHEMA),
    ),
    (
        "Search, but hashtags is an array of strings instead of an array of Tag.",
        IrregularShape::Ref("Search"),
    ),
    (
        "Status. When scheduled_at is present, ScheduledStatus is returned instead.",
        IrregularShape::OneOf(&["Status", "ScheduledStatus"]),
    ),
    (
        "Status with source text and poll or media_attachments",
        IrregularShape::Ref("Status"),
    ),
    ("Health status", IrregularShape::Ref(HASH_SCHEMA)),
];

/// Looks up an irregular phrase.
pub fn lookup_phrase(text: &str) -> Option<IrregularShape> {
    IRREGULAR_PHRASES
        .iter()
        .find(|(phrase, _)| *phrase == text)
        .map(|(_, shape)| *shape)
}

impl IrregularShape {
    /// Builds the schema node for `phrase`.
    pub fn build(&self, phrase: &str) -> SchemaOrRef {
        let description = Some(phrase.to_string());
        match self {
            IrregularShape::String => Schema::primitive(DataType::String, false)
                .with_description(description)
                .into(),
            IrregularShape::Ref(name) => Reference::schema(name).into(),
            IrregularShape::Object => Schema::free_form_object()
                .with_description(description)
                .into(),
            IrregularShape::IntegerRecord(fields) => {
                Schema::object(record_properties(fields, DataType::Integer))
                    .with_description(description)
                    .into()
            }
            IrregularShape::OneOf(names) => Schema::one_of(
                names
                    .iter()
                    .map(|name| Reference::schema(name).into())
                    .collect(),
            )
            .into(),
        }
    }
}

/// Endpoint whose success response is fixed rather than parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointOverride {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
    /// Properties of each array element, all typed `string`.
    pub record_fields: &'static [&'static str],
}

/// Endpoints whose `Returns:` prose cannot be parsed, keyed by verb and canonical path.
pub const IRREGULAR_ENDPOINTS: &[EndpointOverride] = &[EndpointOverride {
    method: "GET",
    path: "/api/v1/instance/activity",
    description: "Array of Hash",
    record_fields: &["week", "statuses", "logins", "registrations"],
}];

/// Returns the fixed success response of an irregular endpoint, if any.
pub fn lookup_endpoint(method: &str, path: &str) -> Option<Response> {
    IRREGULAR_ENDPOINTS
        .iter()
        .find(|e| e.method.eq_ignore_ascii_case(method) && e.path == path)
        .map(|e| {
            let record = Schema::object(record_properties(e.record_fields, DataType::String));
            Response::json(e.description, Schema::array(record.into(), false))
        })
}

fn record_properties(fields: &[&str], data_type: DataType) -> BTreeMap<String, SchemaOrRef> {
    fields
        .iter()
        .map(|field| (field.to_string(), Schema::primitive(data_type, false).into()))
        .collect()
}
