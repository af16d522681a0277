//! Component registry and reference linking.
//!
//! Registration happens in two passes. Entity pages register named
//! responses in any order, each carrying its schema inline. Once every page
//! has been read, [`ComponentRegistry::link`] moves the inline schemas into
//! the schema registry and leaves `$ref`s behind; only then can references
//! from paths and other schemas be checked, so the checks live on
//! [`LinkedComponents`].

use std::collections::{BTreeMap, BTreeSet};

use crate::config::{
    BEARER_AUTH_SCHEME, CATCH_ALL_SCHEMA, EMPTY_SCHEMA, ERROR_SCHEMA, HASH_SCHEMA,
    MEDIA_TYPE_EVENT_STREAM, STREAMING_SCHEMA,
};
use crate::error_handling::{ExtractionStats, WarningType};
use crate::openapi::{
    Components, DataType, Paths, RefTarget, Reference, Response, Schema, SchemaOrRef,
    SecurityScheme,
};

/// Named responses collected from entity pages, plus the shared built-ins.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    responses: BTreeMap<String, Response>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentRegistry {
    /// A registry seeded with `Error`, `Streaming`, `Empty` and the
    /// `JSON`/`Hash` catch-alls.
    pub fn new() -> Self {
        let mut responses = BTreeMap::new();

        let mut error = BTreeMap::new();
        error.insert(
            "error".to_string(),
            Schema::primitive(DataType::String, false)
                .with_description(Some("The error message.".to_string()))
                .into(),
        );
        responses.insert(
            ERROR_SCHEMA.to_string(),
            Response::json("Represents an error message.", Schema::object(error)),
        );
        responses.insert(
            STREAMING_SCHEMA.to_string(),
            Response::with_media(
                "Represents a server-sent event stream.",
                MEDIA_TYPE_EVENT_STREAM,
                Schema::primitive(DataType::String, false),
            ),
        );
        responses.insert(
            EMPTY_SCHEMA.to_string(),
            Response::json("An empty object.", Schema::object(BTreeMap::new())),
        );
        for (name, description) in [
            (CATCH_ALL_SCHEMA, "Arbitrary JSON without a documented shape."),
            (HASH_SCHEMA, "A JSON object with arbitrary keys."),
        ] {
            responses.insert(
                name.to_string(),
                Response::json(description, Schema::free_form_object()),
            );
        }

        ComponentRegistry { responses }
    }

    /// Registers a named response. A later registration of the same name
    /// replaces the earlier one.
    pub fn register(&mut self, name: String, response: Response) {
        if self.responses.insert(name.clone(), response).is_some() {
            log::debug!("component {} registered again, keeping the later one", name);
        }
    }

    pub fn extend(&mut self, entities: BTreeMap<String, Response>) {
        for (name, response) in entities {
            self.register(name, response);
        }
    }

    /// Moves every inline response schema into the schema registry under the
    /// response's name, replacing it with a reference.
    pub fn link(self) -> LinkedComponents {
        let mut schemas = BTreeMap::new();
        let mut responses = self.responses;

        for (name, response) in responses.iter_mut() {
            for media in response.content.values_mut() {
                if media.schema.as_reference().is_some() {
                    continue;
                }
                let reference = SchemaOrRef::from(Reference::schema(name));
                let schema = std::mem::replace(&mut media.schema, reference);
                if schemas.insert(name.clone(), schema).is_some() {
                    log::debug!("response {} has several media types, keeping the last", name);
                }
            }
        }

        log::debug!("linked {} schemas", schemas.len());
        LinkedComponents { schemas, responses }
    }
}

/// Components after linking: every named schema lives in `schemas`.
#[derive(Debug, Clone)]
pub struct LinkedComponents {
    schemas: BTreeMap<String, SchemaOrRef>,
    responses: BTreeMap<String, Response>,
}

impl LinkedComponents {
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    pub fn schemas(&self) -> &BTreeMap<String, SchemaOrRef> {
        &self.schemas
    }

    /// Checks every reference in `paths` and in the registered schemas.
    ///
    /// A reference to a name that was never registered is pointed at the
    /// catch-all schema, keeping its description. Returns the number of
    /// references rewritten.
    pub fn resolve_references(&mut self, paths: &mut Paths, stats: &ExtractionStats) -> usize {
        let schema_names: BTreeSet<String> = self.schemas.keys().cloned().collect();
        let response_names: BTreeSet<String> = self.responses.keys().cloned().collect();
        let mut rewritten = 0;

        let mut check = |reference: &mut Reference| {
            let known = match reference.target() {
                Some((RefTarget::Schemas, name)) => schema_names.contains(name),
                Some((RefTarget::Responses, name)) => response_names.contains(name),
                None => true,
            };
            if !known {
                log::warn!(
                    "dangling reference {}, using {}",
                    reference.reference,
                    CATCH_ALL_SCHEMA
                );
                stats.increment_warning(WarningType::DanglingReference);
                reference.reference = Reference::schema(CATCH_ALL_SCHEMA).reference;
                rewritten += 1;
            }
        };

        let path_media = paths
            .values_mut()
            .flat_map(|item| item.values_mut())
            .flat_map(|operation| operation.responses.values_mut())
            .flat_map(|response| response.content.values_mut());
        let component_media = self
            .responses
            .values_mut()
            .flat_map(|response| response.content.values_mut());
        for media in path_media.chain(component_media) {
            media.schema.visit_references_mut(&mut check);
        }
        for schema in self.schemas.values_mut() {
            schema.visit_references_mut(&mut check);
        }

        rewritten
    }

    /// Final components block, with the bearer-token security scheme.
    pub fn into_components(self) -> Components {
        let mut security_schemes = BTreeMap::new();
        security_schemes.insert(BEARER_AUTH_SCHEME.to_string(), SecurityScheme::bearer());
        Components {
            schemas: self.schemas,
            responses: self.responses,
            security_schemes,
        }
    }
}
