//! Cleaner configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabcleanError};
use crate::replace::MatchMode;

/// Tokens read as missing when building a table from raw strings.
pub const DEFAULT_NULL_TOKENS: &[&str] = &["", "NA", "N/A", "null", "none", "nil", "nan", "."];

/// Configuration for a [`Cleaner`](crate::Cleaner).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Column that identifies rows in the change log.
    pub id_column: String,
    /// Default match mode for replacement maps.
    pub match_mode: MatchMode,
    /// Raw cell tokens parsed as missing values.
    pub null_tokens: Vec<String>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            id_column: "id".to_string(),
            match_mode: MatchMode::default(),
            null_tokens: DEFAULT_NULL_TOKENS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CleanerConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| TabcleanError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&contents)
    }

    fn validate(&self) -> Result<()> {
        if self.id_column.trim().is_empty() {
            return Err(TabcleanError::Config("id_column must not be empty".to_string()));
        }
        Ok(())
    }
}
