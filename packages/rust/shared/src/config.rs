//! Application configuration for srcprint.
//!
//! User config lives at `~/.srcprint/srcprint.toml`.
//! CLI flags override config file values, which override defaults.
//! The file is only ever read; srcprint never writes it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SrcprintError};
use crate::types::{DEFAULT_STYLE, DEFAULT_WIDTH, OutputFormat};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "srcprint.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".srcprint";

// ---------------------------------------------------------------------------
// Config structs (matching srcprint.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Style registry settings.
    #[serde(default)]
    pub styles: StylesConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Highlighting style name.
    #[serde(default = "default_style")]
    pub style: String,

    /// Wrap width for HTML output.
    #[serde(default = "default_width")]
    pub width: usize,

    /// Output format when `--latex` is not given.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            style: default_style(),
            width: default_width(),
            format: OutputFormat::default(),
        }
    }
}

fn default_style() -> String {
    DEFAULT_STYLE.into()
}
fn default_width() -> usize {
    DEFAULT_WIDTH
}

/// `[styles]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StylesConfig {
    /// Directory with extra `.tmTheme` files to register as styles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Reject values no run could use.
    pub fn validate(&self) -> Result<()> {
        if self.defaults.width == 0 {
            return Err(SrcprintError::config("defaults.width must be at least 1"));
        }
        if self.defaults.style.trim().is_empty() {
            return Err(SrcprintError::config("defaults.style must not be empty"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.srcprint/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| SrcprintError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.srcprint/srcprint.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = match config_file_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(error = %e, "no home directory, using default config");
            return Ok(AppConfig::default());
        }
    };

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SrcprintError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        SrcprintError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;

    tracing::debug!(?path, "loaded config file");
    Ok(config)
}
