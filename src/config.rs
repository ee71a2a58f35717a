//! Configuration file support for ai-act-audit.
//!
//! Provides YAML-based scan configuration through `ai-act-audit.config.yml`
//! files, including data structures, file loading, and validation. The file
//! is auto-discovered in the scanned repository; command-line flags take
//! precedence over it.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::shared::Result;

const CONFIG_FILENAME: &str = "ai-act-audit.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Skip files larger than this size during scanning, in megabytes.
    pub max_file_size_mb: Option<u64>,
    /// Directory names excluded from the walk, in addition to the built-in list.
    pub exclude_dirs: Option<Vec<String>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.max_file_size_mb == Some(0) {
        bail!(
            "Invalid config: max_file_size_mb must be greater than 0.\n\n\
             💡 Hint: Omit the field to use the default scan limit."
        );
    }
    if let Some(ref exclude_dirs) = config.exclude_dirs {
        for (i, dir) in exclude_dirs.iter().enumerate() {
            if dir.trim().is_empty() {
                bail!(
                    "Invalid config: exclude_dirs[{}] must not be empty.\n\n\
                     💡 Hint: Each exclude_dirs entry must be a directory name (e.g., \"vendor\").",
                    i
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
