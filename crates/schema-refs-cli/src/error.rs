//! Error types for the command line front end

use schema_refs::{LoadError, ResolveError};
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to fetch schema document: {0}")]
    FetchError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("No references to resolve - pass one or more references or --all")]
    NoReferences,

    #[error("JSON output error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML output error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}
