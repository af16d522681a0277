//! OpenAPI 3.1 output model.
//!
//! Plain data holders serialized with `serde`. Field names and nesting follow
//! the OpenAPI object model exactly (`content[mime].schema`, `$ref`,
//! `securitySchemes`) so downstream tools accept the output unchanged.
//! Maps are ordered for reproducible output.

mod component;
mod path;
mod schema;

use serde::Serialize;

pub use component::{Components, SecurityScheme};
pub use path::{
    MediaType, Operation, Parameter, ParameterLocation, PathItem, Paths, Response,
    SecurityRequirement,
};
pub use schema::{DataType, RefTarget, Reference, Schema, SchemaOrRef, TypeSet};

/// ref: <https://spec.openapis.org/oas/v3.1.0#license-object>
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct License {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

/// ref: <https://spec.openapis.org/oas/v3.1.0#info-object>
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

impl Info {
    /// The fixed info block of the generated document.
    pub fn mastodon() -> Self {
        use crate::config::{
            API_DESCRIPTION, API_LICENSE_IDENTIFIER, API_LICENSE_NAME, API_SUMMARY, API_TITLE,
            API_VERSION,
        };

        Info {
            title: API_TITLE.to_string(),
            version: API_VERSION.to_string(),
            summary: Some(API_SUMMARY.to_string()),
            description: Some(API_DESCRIPTION.to_string()),
            license: Some(License {
                name: API_LICENSE_NAME.to_string(),
                identifier: Some(API_LICENSE_IDENTIFIER.to_string()),
            }),
        }
    }
}

/// The root of the generated document.
///
/// ref: <https://spec.openapis.org/oas/v3.1.0#openapi-object>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenApi {
    pub openapi: String,
    pub info: Info,
    pub paths: Paths,
    pub components: Components,
}

impl OpenApi {
    pub fn new(info: Info, paths: Paths, components: Components) -> Self {
        OpenApi {
            openapi: crate::config::OPENAPI_VERSION.to_string(),
            info,
            paths,
            components,
        }
    }

    /// Number of operations across all paths.
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|item| item.len()).sum()
    }
}
