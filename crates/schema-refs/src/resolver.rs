//! Copy-on-write `$ref` resolver
//!
//! Resolution never writes to its input. Any node whose subtree contains no
//! resolved reference is returned as the original `Arc`; only the nodes on
//! the path to a resolved reference are copied, together with the `items`
//! or `additionalProperties` wrapper holding the changed child.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::error::{ResolveError, ResolveResult};
use crate::lookup::SchemaLookup;
use crate::settings::ResolverSettings;
use crate::types::{AdditionalProperties, Items, Schema};

/// Resolve the schema behind `start`, replacing every reachable reference
pub fn resolve<L>(lookup: &L, start: &str) -> ResolveResult<Arc<Schema>>
where
    L: SchemaLookup + ?Sized,
{
    SchemaResolver::new(lookup).resolve_ref(start)
}

/// Resolve every reference reachable from an existing schema
pub fn resolve_schema<L>(lookup: &L, schema: &Arc<Schema>) -> ResolveResult<Arc<Schema>>
where
    L: SchemaLookup + ?Sized,
{
    SchemaResolver::new(lookup).resolve(schema)
}

/// Resolves `$ref` references against a lookup
///
/// References are followed through `properties`, `items` and allowed
/// `additionalProperties`. A reference already being resolved further up the
/// current path is a cycle: the node holding it is returned unexpanded.
pub struct SchemaResolver<'a, L: ?Sized> {
    lookup: &'a L,
    settings: ResolverSettings,
}

impl<'a, L> SchemaResolver<'a, L>
where
    L: SchemaLookup + ?Sized,
{
    /// Create a resolver with default settings
    pub fn new(lookup: &'a L) -> Self {
        Self {
            lookup,
            settings: ResolverSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ResolverSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.settings.max_depth = Some(max_depth);
        self
    }

    /// Look up `start` and resolve the schema it points at
    pub fn resolve_ref(&self, start: &str) -> ResolveResult<Arc<Schema>> {
        debug!("Resolving schema: {}", start);

        let root = self.fetch(start)?;
        let mut resolving = HashSet::new();
        resolving.insert(start.to_string());
        self.resolve_node(&root, &mut resolving, 0)
    }

    /// Resolve a schema that is not itself registered in the lookup
    pub fn resolve(&self, schema: &Arc<Schema>) -> ResolveResult<Arc<Schema>> {
        let mut resolving = HashSet::new();
        self.resolve_node(schema, &mut resolving, 0)
    }

    fn fetch(&self, reference: &str) -> ResolveResult<Arc<Schema>> {
        self.lookup
            .lookup(reference)
            .ok_or_else(|| ResolveError::UnresolvedReference(reference.to_string()))
    }

    fn resolve_node(
        &self,
        schema: &Arc<Schema>,
        resolving: &mut HashSet<String>,
        depth: usize,
    ) -> ResolveResult<Arc<Schema>> {
        if let Some(limit) = self.settings.max_depth {
            if depth > limit {
                return Err(ResolveError::DepthExceeded(limit));
            }
        }

        if let Some(reference) = schema.reference_of() {
            if resolving.contains(reference) {
                trace!("Cycle through {}, leaving reference unexpanded", reference);
                return Ok(Arc::clone(schema));
            }

            let target = self.fetch(reference)?;
            trace!("Following {}", reference);

            resolving.insert(reference.to_string());
            let resolved = self.resolve_node(&target, resolving, depth + 1);
            resolving.remove(reference);
            return resolved;
        }

        let properties = self.resolve_properties(&schema.properties, resolving, depth)?;
        let items = match schema.items.as_deref() {
            Some(items) => self.resolve_items(items, resolving, depth)?,
            None => None,
        };
        let additional_properties = match schema.additional_properties.as_deref() {
            Some(additional) => self.resolve_additional_properties(additional, resolving, depth)?,
            None => None,
        };

        if properties.is_none() && items.is_none() && additional_properties.is_none() {
            return Ok(Arc::clone(schema));
        }

        let mut resolved = Schema::clone(schema);
        if let Some(properties) = properties {
            resolved.properties = properties;
        }
        if let Some(items) = items {
            resolved.items = Some(Arc::new(items));
        }
        if let Some(additional) = additional_properties {
            resolved.additional_properties = Some(Arc::new(additional));
        }
        Ok(Arc::new(resolved))
    }

    /// Returns a new map only when at least one property changed
    fn resolve_properties(
        &self,
        properties: &IndexMap<String, Arc<Schema>>,
        resolving: &mut HashSet<String>,
        depth: usize,
    ) -> ResolveResult<Option<IndexMap<String, Arc<Schema>>>> {
        let mut changed = false;
        let mut resolved = IndexMap::with_capacity(properties.len());
        for (name, property) in properties {
            let property_resolved = self.resolve_node(property, resolving, depth + 1)?;
            changed |= !Arc::ptr_eq(&property_resolved, property);
            resolved.insert(name.clone(), property_resolved);
        }
        Ok(changed.then_some(resolved))
    }

    fn resolve_items(
        &self,
        items: &Items,
        resolving: &mut HashSet<String>,
        depth: usize,
    ) -> ResolveResult<Option<Items>> {
        match items {
            Items::Single(schema) => {
                let resolved = self.resolve_node(schema, resolving, depth + 1)?;
                if Arc::ptr_eq(&resolved, schema) {
                    Ok(None)
                } else {
                    Ok(Some(Items::Single(resolved)))
                }
            }
            Items::Tuple(entries) => {
                let mut changed = false;
                let mut resolved = Vec::with_capacity(entries.len());
                for entry in entries {
                    let entry_resolved = self.resolve_node(entry, resolving, depth + 1)?;
                    changed |= !Arc::ptr_eq(&entry_resolved, entry);
                    resolved.push(entry_resolved);
                }
                Ok(changed.then_some(Items::Tuple(resolved)))
            }
        }
    }

    fn resolve_additional_properties(
        &self,
        additional: &AdditionalProperties,
        resolving: &mut HashSet<String>,
        depth: usize,
    ) -> ResolveResult<Option<AdditionalProperties>> {
        let schema = match additional.schema.as_ref() {
            Some(schema) if additional.allows => schema,
            _ => return Ok(None),
        };

        let resolved = self.resolve_node(schema, resolving, depth + 1)?;
        if Arc::ptr_eq(&resolved, schema) {
            return Ok(None);
        }
        Ok(Some(AdditionalProperties {
            allows: additional.allows,
            schema: Some(resolved),
        }))
    }
}
