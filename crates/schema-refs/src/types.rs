//! Structural view of a schema node
//!
//! Only the keywords the resolver walks are modelled as fields. Everything
//! else is kept verbatim in [`Schema::extra`] so that copying a node never
//! drops validation keywords it does not understand.
//!
//! Child schemas are held behind [`Arc`] so resolved output can share
//! untouched subtrees with its input. Nodes reachable from a resolved schema
//! must be treated as immutable.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// A schema node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// `$ref` pointer to another schema definition
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Type discriminator; empty when absent, more than one entry when ambiguous
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Vec::is_empty",
        with = "string_or_vec"
    )]
    pub schema_type: Vec<String>,
    /// Named object properties
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Arc<Schema>>,
    /// `allOf` composition
    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Arc<Schema>>,
    /// Array element descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Arc<Items>>,
    /// Catch-all value descriptor for maps
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<Arc<AdditionalProperties>>,
    /// Every other keyword, carried through untouched
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Array items descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Items {
    /// Tuple-typed array, one schema per position
    Tuple(Vec<Arc<Schema>>),
    /// Every element shares one schema
    Single(Arc<Schema>),
}

/// `additionalProperties` descriptor
///
/// Serialized as a bare boolean when there is no schema, otherwise as the
/// schema itself (which implies `allows`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "RawAdditionalProperties",
    into = "RawAdditionalProperties"
)]
pub struct AdditionalProperties {
    /// Whether properties beyond the named ones are allowed at all
    pub allows: bool,
    /// Value schema for additional properties
    pub schema: Option<Arc<Schema>>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawAdditionalProperties {
    Allows(bool),
    Schema(Arc<Schema>),
}

impl From<RawAdditionalProperties> for AdditionalProperties {
    fn from(raw: RawAdditionalProperties) -> Self {
        match raw {
            RawAdditionalProperties::Allows(allows) => Self {
                allows,
                schema: None,
            },
            RawAdditionalProperties::Schema(schema) => Self {
                allows: true,
                schema: Some(schema),
            },
        }
    }
}

impl From<AdditionalProperties> for RawAdditionalProperties {
    fn from(additional: AdditionalProperties) -> Self {
        match additional.schema {
            Some(schema) if additional.allows => RawAdditionalProperties::Schema(schema),
            _ => RawAdditionalProperties::Allows(additional.allows),
        }
    }
}

impl Schema {
    /// Create a schema with a single type
    pub fn typed(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: vec![schema_type.into()],
            ..Self::default()
        }
    }

    /// Create a bare `$ref` schema
    pub fn reference_to(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Self::default()
        }
    }

    /// Create an array schema whose elements share `items`
    pub fn array_of(items: Schema) -> Self {
        Self {
            items: Some(Arc::new(Items::Single(Arc::new(items)))),
            ..Self::typed("array")
        }
    }

    /// Create an object schema whose additional property values are `values`
    pub fn map_of(values: Schema) -> Self {
        Self {
            additional_properties: Some(Arc::new(AdditionalProperties {
                allows: true,
                schema: Some(Arc::new(values)),
            })),
            ..Self::typed("object")
        }
    }

    pub fn has_type(&self, schema_type: &str) -> bool {
        self.schema_type.iter().any(|t| t == schema_type)
    }

    /// The reference this node stands for, if any
    ///
    /// Besides a plain `$ref`, a lone `allOf` entry that is itself a reference
    /// counts: that form is used to attach a description next to a `$ref`.
    pub fn reference_of(&self) -> Option<&str> {
        if let Some(reference) = self.reference.as_deref() {
            return Some(reference);
        }
        match self.all_of.as_slice() {
            [only] => only.reference_of(),
            _ => None,
        }
    }

    /// Element schema of a single-schema `items`
    pub fn items_schema(&self) -> Option<&Arc<Schema>> {
        match self.items.as_deref() {
            Some(Items::Single(schema)) => Some(schema),
            _ => None,
        }
    }

    /// Value schema of `additionalProperties`, when present
    pub fn additional_properties_schema(&self) -> Option<&Arc<Schema>> {
        self.additional_properties
            .as_deref()
            .and_then(|additional| additional.schema.as_ref())
    }
}

mod string_or_vec {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    pub fn serialize<S: Serializer>(types: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        match types {
            [single] => serializer.serialize_str(single),
            _ => types.serialize(serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(single) => vec![single],
            OneOrMany::Many(types) => types,
        })
    }
}
