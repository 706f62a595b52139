//! Schema document acquisition from files and URLs

use schema_refs::SchemaDirectory;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::error::{CliError, CliResult};

/// Load a schema directory from an `http(s)` URL or a file path
pub async fn load_directory(source: &str) -> CliResult<SchemaDirectory> {
    match remote_url(source) {
        Some(url) => fetch_directory(&url).await,
        None => read_directory(Path::new(source)).await,
    }
}

/// The source as a URL when it names an `http(s)` resource
fn remote_url(source: &str) -> Option<Url> {
    Url::parse(source)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

/// Read and parse a schema document from disk
pub async fn read_directory(path: &Path) -> CliResult<SchemaDirectory> {
    debug!("Reading schema document from {:?}", path);

    let content = tokio::fs::read_to_string(path).await?;

    let directory = if has_yaml_extension(path.to_str().unwrap_or_default()) {
        SchemaDirectory::parse_yaml(&content)?
    } else {
        SchemaDirectory::parse(&content)?
    };
    Ok(directory)
}

/// Fetch and parse a schema document over HTTP
pub async fn fetch_directory(url: &Url) -> CliResult<SchemaDirectory> {
    info!("Fetching schema document from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| CliError::HttpError(e.to_string()))?;

    let response = client
        .get(url.clone())
        .header("Accept", "application/json, application/yaml, text/yaml")
        .send()
        .await
        .map_err(|e| CliError::FetchError(e.to_string()))?;

    if !response.status().is_success() {
        return Err(CliError::FetchError(format!(
            "HTTP {} from {}",
            response.status(),
            url
        )));
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_default();

    let content = response
        .text()
        .await
        .map_err(|e| CliError::FetchError(e.to_string()))?;

    let directory = if content_type.contains("yaml") || has_yaml_extension(url.path()) {
        SchemaDirectory::parse_yaml(&content)?
    } else {
        SchemaDirectory::parse(&content)?
    };
    Ok(directory)
}

fn has_yaml_extension(name: &str) -> bool {
    name.ends_with(".yaml") || name.ends_with(".yml")
}
