//! Error types for reference resolution and directory loading

use thiserror::Error;

/// Result type alias for resolver operations
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

/// Result type alias for directory loading
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Resolution error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Reference not found: {0}")]
    UnresolvedReference(String),

    #[error("Maximum resolution depth of {0} exceeded")]
    DepthExceeded(usize),
}

/// Schema document loading errors
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid schema document: {0}")]
    InvalidFormat(String),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
