//! Configuration for paging defaults
//!
//! Loaded from YAML (`.yaml`/`.yml`) or JSON (`.json`) files. Every field is
//! optional and falls back to its default.

use crate::error::{Error, Result};
use crate::math;
use crate::slicing::PageRequest;
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Paging defaults applied when a caller does not say otherwise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Page size used when none is given
    pub default_page_size: usize,

    /// Clamp a page number past the end down to the last page
    pub adjust_last_page_when_exceeding: bool,

    /// Keep deferred page items for repeated listings
    pub cache_items: bool,

    /// Default log level for the command-line tool
    pub log_level: LogLevel,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            adjust_last_page_when_exceeding: true,
            cache_items: false,
            log_level: LogLevel::default(),
        }
    }
}

fn default_page_size() -> usize {
    20
}

impl PagingConfig {
    /// Load a configuration file, picking the format from its extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(Error::config(format!(
                "Unsupported config file '{}': expected .yaml, .yml or .json",
                path.display()
            ))),
        }
    }

    /// Parse and validate a YAML configuration
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no page could be built from
    pub fn validate(&self) -> Result<()> {
        math::validate_page_size(self.default_page_size)
            .map_err(|e| Error::config(format!("default_page_size: {e}")))
    }

    /// Request `page_number` with the configured defaults
    pub fn request(&self, page_number: usize) -> PageRequest {
        PageRequest::new(page_number, self.default_page_size)
            .with_adjust(self.adjust_last_page_when_exceeding)
    }
}
