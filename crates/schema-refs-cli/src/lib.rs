//! # schema-refs-cli
//!
//! Loads a schema document from disk or over HTTP and prints dereferenced
//! definitions as JSON or YAML.

mod error;
pub mod output;
pub mod source;

pub use error::{CliError, CliResult};
pub use output::{render, resolve_references, OutputFormat};
pub use source::load_directory;
