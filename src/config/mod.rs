//! Configuration system for queryquill.
//!
//! This module provides the configuration structure for the queryquill
//! command line tool with sensible defaults and support for serialization via
//! serde. Configuration is loaded from a TOML file and overridden by
//! command-line arguments.
//!
//! # Example
//!
//! ```
//! use queryquill::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert!(config.force_root_match);
//! assert_eq!(config.output_format, "text");
//!
//! // Create custom configuration
//! let custom = Config {
//!     output_format: "json".to_string(),
//!     ..Config::default()
//! };
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the queryquill tool.
///
/// # Fields
///
/// * `force_root_match` - Compile examples with the root treated as the match (default: true)
/// * `output_format` - How results are printed: "text" or "json" (default: "text")
/// * `log_level` - Log filter used when `RUST_LOG` is unset (default: "warn")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_force_root_match")]
    pub force_root_match: bool,

    #[serde(default = "default_output_format")]
    pub output_format: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Returns the default root handling.
fn default_force_root_match() -> bool {
    true
}

/// Returns the default output format.
fn default_output_format() -> String {
    "text".to_string()
}

/// Returns the default log filter.
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            force_root_match: default_force_root_match(),
            output_format: default_output_format(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/queryquill/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("queryquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from the given file, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), "ignoring invalid config: {}", err);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to the given file.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Whether results should be printed as JSON.
    pub fn is_json(&self) -> bool {
        self.output_format.eq_ignore_ascii_case("json")
    }
}
