//! Display and export settings.
//!
//! Deserialized from `elfscope.toml` in the working directory, or from the
//! file named by `--config`. Every key is optional.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// File picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "elfscope.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Text output settings.
    pub display: DisplayConfig,
    /// JSON export settings.
    pub export: ExportConfig,
}

/// Settings for the text views.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Column width for section names when not running with `--wide`.
    pub name_width: usize,
    /// Demangle symbol names even without `-C`.
    pub demangle: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            name_width: 17,
            demangle: false,
        }
    }
}

/// Settings for `--export`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Indent the JSON document.
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Load the configuration from `explicit`, or from [`DEFAULT_CONFIG_FILE`]
/// if it exists, or fall back to the defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return read(path);
    }
    let path = Path::new(DEFAULT_CONFIG_FILE);
    if path.is_file() {
        read(path)
    } else {
        Ok(Config::default())
    }
}

fn read(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = parse(&text).with_context(|| format!("invalid config {}", path.display()))?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

fn parse(text: &str) -> Result<Config> {
    Ok(toml::from_str(text)?)
}
