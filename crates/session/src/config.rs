//! Session configuration
//!
//! Everything a host can tune without touching the inputs: how many items to
//! recommend and which table columns name persons and items. Loaded from
//! JSON; missing fields take their defaults.
//!
//! ```json
//! { "limit": 3, "columns": { "item_column": "title" } }
//! ```

use anyhow::{Context, Result};
use data_loader::ColumnChoices;
use pipeline::DEFAULT_LIMIT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of recommendations per person
    pub limit: usize,

    /// Explicit column choices for alignment
    pub columns: ColumnChoices,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            columns: ColumnChoices::default(),
        }
    }
}

impl SessionConfig {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_columns(mut self, columns: ColumnChoices) -> Self {
        self.columns = columns;
        self
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Invalid session configuration")
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}
