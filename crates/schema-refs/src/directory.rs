//! In-memory schema directory keyed by reference string

use crate::error::{LoadError, LoadResult};
use crate::lookup::SchemaLookup;
use crate::types::Schema;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

const DEFINITIONS_PREFIX: &str = "#/definitions/";
const DEFS_PREFIX: &str = "#/$defs/";
const COMPONENT_SCHEMAS_PREFIX: &str = "#/components/schemas/";

/// Read-only store of named schemas
///
/// Schemas are shared: every lookup hands out the same `Arc`, so resolutions
/// over one directory can compare results against it by identity.
#[derive(Debug, Clone, Default)]
pub struct SchemaDirectory {
    schemas: IndexMap<String, Arc<Schema>>,
}

/// Definition tables of a schema document
#[derive(Debug, Default, Deserialize)]
struct RawDocument {
    #[serde(default)]
    definitions: IndexMap<String, Schema>,
    #[serde(rename = "$defs", default)]
    defs: IndexMap<String, Schema>,
    #[serde(default)]
    components: Option<RawComponents>,
}

#[derive(Debug, Default, Deserialize)]
struct RawComponents {
    #[serde(default)]
    schemas: IndexMap<String, Schema>,
}

impl SchemaDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under a reference string, replacing any previous entry
    pub fn insert(&mut self, reference: impl Into<String>, schema: Schema) -> Arc<Schema> {
        let schema = Arc::new(schema);
        self.schemas.insert(reference.into(), Arc::clone(&schema));
        schema
    }

    pub fn get(&self, reference: &str) -> Option<&Arc<Schema>> {
        self.schemas.get(reference)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Registered references in insertion order
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Parse a schema document (auto-detects JSON/YAML)
    pub fn parse(content: &str) -> LoadResult<Self> {
        if content.trim_start().starts_with('{') {
            Self::parse_json(content)
        } else {
            Self::parse_yaml(content)
        }
    }

    /// Parse a schema document from JSON
    pub fn parse_json(content: &str) -> LoadResult<Self> {
        let raw: RawDocument = serde_json::from_str(content)?;
        Ok(Self::from_raw(raw))
    }

    /// Parse a schema document from YAML
    pub fn parse_yaml(content: &str) -> LoadResult<Self> {
        let raw: RawDocument = serde_yaml::from_str(content)?;
        Ok(Self::from_raw(raw))
    }

    /// Build a directory from an already decoded document
    pub fn from_value(document: Value) -> LoadResult<Self> {
        if !document.is_object() {
            return Err(LoadError::InvalidFormat(
                "schema document must be an object".to_string(),
            ));
        }
        let raw: RawDocument = serde_json::from_value(document)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawDocument) -> Self {
        let mut directory = Self::new();

        let components = raw.components.unwrap_or_default().schemas;
        let tables = [
            (DEFINITIONS_PREFIX, raw.definitions),
            (DEFS_PREFIX, raw.defs),
            (COMPONENT_SCHEMAS_PREFIX, components),
        ];
        for (prefix, table) in tables {
            for (name, schema) in table {
                directory.insert(format!("{}{}", prefix, name), schema);
            }
        }

        debug!("Loaded {} schema definitions", directory.len());
        directory
    }
}

impl SchemaLookup for SchemaDirectory {
    fn lookup(&self, reference: &str) -> Option<Arc<Schema>> {
        self.schemas.get(reference).cloned()
    }
}

impl FromIterator<(String, Schema)> for SchemaDirectory {
    fn from_iter<I: IntoIterator<Item = (String, Schema)>>(iter: I) -> Self {
        let mut directory = Self::new();
        for (reference, schema) in iter {
            directory.insert(reference, schema);
        }
        directory
    }
}
