//! # schema-refs
//!
//! Copy-on-write `$ref` resolver for JSON Schema and OpenAPI definitions.
//! Produces fully dereferenced schemas that share every untouched subtree
//! with the input, which is never modified.

mod directory;
mod error;
mod lookup;
mod resolver;
mod settings;
mod types;

pub use directory::SchemaDirectory;
pub use error::{LoadError, LoadResult, ResolveError, ResolveResult};
pub use lookup::SchemaLookup;
pub use resolver::{resolve, resolve_schema, SchemaResolver};
pub use settings::ResolverSettings;
pub use types::{AdditionalProperties, Items, Schema};
