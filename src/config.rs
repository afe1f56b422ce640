//! Tool configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a user config file in the config directory; the file is
//! sparse, so it only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [loader]
//! chunk_size = 5                                 # Items per chunk (> 0)
//! description = "Loading content"                # Progress description
//! complete_message = "Content loading complete"  # Published on completion
//!
//! [analyzer]
//! heading_order = "grouped"  # "grouped" (h1s, h2s, h3s) or "document"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::analyze::HeadingOrder;
use crate::loader::{DEFAULT_CHUNK_SIZE, LOADING_COMPLETE_MESSAGE, LOADING_DESCRIPTION, LoaderLabels};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Chunked loading settings.
    pub loader: LoaderConfig,
    /// Markup analysis settings.
    pub analyzer: AnalyzerConfig,
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loader.chunk_size == 0 {
            return Err(ConfigError::Validation(
                "loader.chunk_size must be greater than 0".into(),
            ));
        }
        if self.loader.description.trim().is_empty() {
            return Err(ConfigError::Validation(
                "loader.description must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Items handed to the transform per chunk.
    pub chunk_size: usize,
    /// Description published with every progress snapshot.
    pub description: String,
    /// Message published once loading completes.
    pub complete_message: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            description: LOADING_DESCRIPTION.to_string(),
            complete_message: LOADING_COMPLETE_MESSAGE.to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn labels(&self) -> LoaderLabels {
        LoaderLabels {
            description: self.description.clone(),
            complete_message: self.complete_message.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub heading_order: HeadingOrder,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ToolConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    debug!(path = %config_path.display(), "loading config");
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ToolConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ToolConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<ToolConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# site-content configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Chunked loading
# ---------------------------------------------------------------------------
[loader]
# Number of items handed to the transform at once. Must be greater than 0.
chunk_size = 5

# Description published with every progress snapshot.
description = "Loading content"

# Message published once every chunk has been processed.
complete_message = "Content loading complete"

# ---------------------------------------------------------------------------
# Markup analysis
# ---------------------------------------------------------------------------
[analyzer]
# Order of headings reported by analyze-html:
#   "grouped"  - every h1, then every h2, then every h3
#   "document" - as they appear in the text
heading_order = "grouped"
"##
}
