//! Resolver settings
//!
//! Stored as a small camelCase JSON file. Missing fields take their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::LoadResult;

/// Resolution policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverSettings {
    /// Maximum nesting depth of one walk (unbounded when unset)
    ///
    /// Cycles terminate without it; this only bounds very deep or
    /// adversarial schema graphs.
    pub max_depth: Option<usize>,
}

impl ResolverSettings {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Load settings from a JSON file, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> LoadResult<Self> {
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)?;
        debug!("Loaded resolver settings from {:?}", path);
        Ok(settings)
    }
}
