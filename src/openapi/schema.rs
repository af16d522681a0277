//! Schema and Reference objects.
//!
//! ref: <https://spec.openapis.org/oas/v3.1.0#schema-object>

use std::collections::BTreeMap;

use serde::Serialize;

/// JSON Schema data types used by the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Boolean,
    Integer,
    Number,
    String,
    Object,
    Array,
    Null,
}

impl DataType {
    /// Matches a free-text token against the built-in primitive set, case-insensitively.
    pub fn primitive(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "boolean" => Some(DataType::Boolean),
            "integer" => Some(DataType::Integer),
            "number" => Some(DataType::Number),
            "string" => Some(DataType::String),
            _ => None,
        }
    }
}

/// The `type` keyword: a single type, or a type paired with `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(DataType),
    Nullable([DataType; 2]),
}

impl TypeSet {
    pub fn new(data_type: DataType, nullable: bool) -> Self {
        if nullable {
            TypeSet::Nullable([data_type, DataType::Null])
        } else {
            TypeSet::Single(data_type)
        }
    }

    /// The non-null member of the set.
    pub fn data_type(&self) -> DataType {
        match self {
            TypeSet::Single(t) | TypeSet::Nullable([t, _]) => *t,
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeSet::Nullable(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaOrRef>>,
    #[serde(rename = "oneOf", skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<SchemaOrRef>>,
}

impl Schema {
    pub fn primitive(data_type: DataType, nullable: bool) -> Self {
        Schema {
            schema_type: Some(TypeSet::new(data_type, nullable)),
            ..Default::default()
        }
    }

    pub fn object(properties: BTreeMap<String, SchemaOrRef>) -> Self {
        Schema {
            schema_type: Some(TypeSet::Single(DataType::Object)),
            properties: Some(properties),
            ..Default::default()
        }
    }

    /// An object without a declared shape.
    pub fn free_form_object() -> Self {
        Schema {
            schema_type: Some(TypeSet::Single(DataType::Object)),
            ..Default::default()
        }
    }

    pub fn array(items: SchemaOrRef, nullable: bool) -> Self {
        Schema {
            schema_type: Some(TypeSet::new(DataType::Array, nullable)),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    pub fn one_of(alternatives: Vec<SchemaOrRef>) -> Self {
        Schema {
            one_of: Some(alternatives),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.is_empty());
        self
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.schema_type.map(|t| t.data_type())
    }
}

/// Component section a reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefTarget {
    Schemas,
    Responses,
}

impl RefTarget {
    pub fn prefix(&self) -> &'static str {
        match self {
            RefTarget::Schemas => "#/components/schemas/",
            RefTarget::Responses => "#/components/responses/",
        }
    }
}

/// ref: <https://spec.openapis.org/oas/v3.1.0#reference-object>
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Reference {
    pub fn to(target: RefTarget, name: &str) -> Self {
        Reference {
            reference: format!("{}{}", target.prefix(), name),
            description: None,
        }
    }

    /// A reference into `#/components/schemas/`.
    pub fn schema(name: &str) -> Self {
        Self::to(RefTarget::Schemas, name)
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.is_empty());
        self
    }

    /// Splits the pointer into its component section and name.
    pub fn target(&self) -> Option<(RefTarget, &str)> {
        [RefTarget::Schemas, RefTarget::Responses]
            .into_iter()
            .find_map(|t| self.reference.strip_prefix(t.prefix()).map(|name| (t, name)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref(Reference),
    Schema(Schema),
}

impl From<Schema> for SchemaOrRef {
    fn from(schema: Schema) -> Self {
        SchemaOrRef::Schema(schema)
    }
}

impl From<Reference> for SchemaOrRef {
    fn from(reference: Reference) -> Self {
        SchemaOrRef::Ref(reference)
    }
}

impl SchemaOrRef {
    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            SchemaOrRef::Schema(s) => Some(s),
            SchemaOrRef::Ref(_) => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            SchemaOrRef::Ref(r) => Some(r),
            SchemaOrRef::Schema(_) => None,
        }
    }

    /// Visits every reference reachable from this node, depth first.
    pub fn visit_references_mut(&mut self, f: &mut dyn FnMut(&mut Reference)) {
        match self {
            SchemaOrRef::Ref(r) => f(r),
            SchemaOrRef::Schema(s) => {
                if let Some(items) = s.items.as_mut() {
                    items.visit_references_mut(f);
                }
                for property in s.properties.iter_mut().flat_map(|p| p.values_mut()) {
                    property.visit_references_mut(f);
                }
                for alternative in s.one_of.iter_mut().flatten() {
                    alternative.visit_references_mut(f);
                }
            }
        }
    }
}
