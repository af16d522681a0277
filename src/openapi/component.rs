//! Reusable components.
//!
//! ref: <https://spec.openapis.org/oas/v3.1.0#components-object>

use std::collections::BTreeMap;

use serde::Serialize;

use super::path::Response;
use super::schema::SchemaOrRef;

/// ref: <https://spec.openapis.org/oas/v3.1.0#security-scheme-object>
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,
    pub scheme: String,
}

impl SecurityScheme {
    pub fn bearer() -> Self {
        SecurityScheme {
            scheme_type: "http".to_string(),
            scheme: "bearer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Components {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, SchemaOrRef>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<String, Response>,
    #[serde(
        rename = "securitySchemes",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub security_schemes: BTreeMap<String, SecurityScheme>,
}
