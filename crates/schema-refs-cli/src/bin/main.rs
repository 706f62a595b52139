//! schema-refs CLI - prints fully dereferenced schema definitions
//!
//! Loads a Swagger/OpenAPI/JSON Schema document, resolves the requested
//! references against its definitions and writes the result to stdout.
//! Logs go to stderr so the output can be piped.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use schema_refs::ResolverSettings;
use schema_refs_cli::{load_directory, render, resolve_references, OutputFormat};

/// Resolve `$ref` pointers in schema documents
#[derive(Parser, Debug)]
#[command(name = "schema-refs")]
#[command(version)]
#[command(about = "Resolve $ref pointers in Swagger, OpenAPI and JSON Schema documents")]
struct Args {
    /// Schema document path or http(s) URL
    source: String,

    /// References to resolve (e.g. "#/definitions/Pod")
    references: Vec<String>,

    /// Resolve every definition in the document
    #[arg(long, conflicts_with = "references")]
    all: bool,

    /// List the references defined by the document and exit
    #[arg(long)]
    list: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Fail when resolution nests deeper than this
    #[arg(long)]
    max_depth: Option<usize>,

    /// Resolver settings file (JSON)
    #[arg(long, env = "SCHEMA_REFS_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut settings = match &args.config {
        Some(path) => ResolverSettings::load(path)?,
        None => ResolverSettings::default(),
    };
    if let Some(max_depth) = args.max_depth {
        settings.max_depth = Some(max_depth);
    }

    let directory = load_directory(&args.source).await?;
    info!("Loaded {} definitions from {}", directory.len(), args.source);

    if args.list {
        for reference in directory.references() {
            println!("{}", reference);
        }
        return Ok(());
    }

    let keyed = args.all || args.references.len() > 1;
    let references = if args.all {
        directory.references().map(str::to_string).collect()
    } else {
        args.references
    };

    let resolved = resolve_references(&directory, &references, settings)?;
    println!("{}", render(&resolved, args.format, keyed)?);

    Ok(())
}
