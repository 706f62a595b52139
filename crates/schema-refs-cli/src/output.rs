//! Resolution of requested references and rendering of the result

use indexmap::IndexMap;
use schema_refs::{ResolverSettings, Schema, SchemaDirectory, SchemaResolver};
use std::sync::Arc;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Output document format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Resolve each requested reference, in order
///
/// Fails on the first reference that cannot be fully resolved.
pub fn resolve_references(
    directory: &SchemaDirectory,
    references: &[String],
    settings: ResolverSettings,
) -> CliResult<IndexMap<String, Arc<Schema>>> {
    if references.is_empty() {
        return Err(CliError::NoReferences);
    }

    let resolver = SchemaResolver::new(directory).with_settings(settings);
    let mut resolved = IndexMap::with_capacity(references.len());
    for reference in references {
        let schema = resolver.resolve_ref(reference)?;
        resolved.insert(reference.clone(), schema);
    }

    debug!("Resolved {} references", resolved.len());
    Ok(resolved)
}

/// Render resolved schemas
///
/// When `keyed` is set the output is a map from reference to schema,
/// otherwise the first resolved schema is printed bare.
pub fn render(
    resolved: &IndexMap<String, Arc<Schema>>,
    format: OutputFormat,
    keyed: bool,
) -> CliResult<String> {
    let document = match resolved.first() {
        Some((_, schema)) if !keyed => serde_json::to_value(&**schema)?,
        _ => serde_json::to_value(resolved)?,
    };

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&document)?,
        OutputFormat::Yaml => serde_yaml::to_string(&document)?,
    };
    Ok(rendered)
}
