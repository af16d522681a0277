//! Paths, operations, parameters and responses.
//!
//! ref: <https://spec.openapis.org/oas/v3.1.0#paths-object>

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use strum_macros::EnumIter;

use super::schema::{Schema, SchemaOrRef};

/// Where a parameter is sent.
///
/// Declaration order is the order parameters are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Path => "path",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    pub schema: Schema,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    pub schema: SchemaOrRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub description: String,
    pub content: BTreeMap<String, MediaType>,
}

impl Response {
    pub fn with_media(
        description: impl Into<String>,
        media_type: &str,
        schema: impl Into<SchemaOrRef>,
    ) -> Self {
        let mut content = BTreeMap::new();
        content.insert(
            media_type.to_string(),
            MediaType {
                schema: schema.into(),
            },
        );
        Response {
            description: description.into(),
            content,
        }
    }

    pub fn json(description: impl Into<String>, schema: impl Into<SchemaOrRef>) -> Self {
        Self::with_media(description, crate::config::MEDIA_TYPE_JSON, schema)
    }
}

/// Security scheme name → required scopes.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Operation {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(serialize_with = "status_keys")]
    pub responses: BTreeMap<u16, Response>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
}

/// Response map keys are strings in the object model, YAML included.
fn status_keys<S: Serializer>(
    responses: &BTreeMap<u16, Response>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        responses
            .iter()
            .map(|(status, response)| (status.to_string(), response)),
    )
}

/// Lower-cased HTTP verb → operation.
pub type PathItem = BTreeMap<String, Operation>;

/// URL template → path item.
pub type Paths = BTreeMap<String, PathItem>;
