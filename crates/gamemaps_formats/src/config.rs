//! Registry configuration, loaded from TOML
//!
//! ```toml
//! [registry]
//! disabled = ["map-b"]
//!
//! [detect]
//! accept_possibly = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::RegistryError;

/// Settings that shape how a registry is built and how detection is used
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub registry: RegistrySettings,
    #[serde(default)]
    pub detect: DetectSettings,
}

/// `[registry]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Codes skipped when building a registry from constructors
    #[serde(default)]
    pub disabled: Vec<String>,
}

/// `[detect]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectSettings {
    /// Accept a `possibly` match when auto-detecting. Otherwise only
    /// `definitely` is good enough.
    #[serde(default = "default_accept_possibly")]
    pub accept_possibly: bool,
}

fn default_accept_possibly() -> bool {
    true
}

impl Default for DetectSettings {
    fn default() -> Self {
        Self {
            accept_possibly: default_accept_possibly(),
        }
    }
}

impl RegistryConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, RegistryError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file. A file that does not exist yields the defaults.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load from the platform config location
    ///
    /// Searches in order:
    /// 1. `$XDG_CONFIG_HOME/gamemaps/config.toml`
    /// 2. Platform-specific config directories
    /// 3. `.gamemaps/config.toml` in the current directory
    pub fn load_default() -> Result<Self, RegistryError> {
        Self::load(&Self::default_path())
    }

    pub fn is_disabled(&self, code: &str) -> bool {
        self.registry.disabled.iter().any(|c| c == code)
    }

    fn default_path() -> PathBuf {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("gamemaps/config.toml");
        }

        #[cfg(target_os = "linux")]
        {
            if let Ok(home) = std::env::var("HOME") {
                return PathBuf::from(home).join(".config/gamemaps/config.toml");
            }
        }

        #[cfg(target_os = "macos")]
        {
            if let Ok(home) = std::env::var("HOME") {
                return PathBuf::from(home)
                    .join("Library/Application Support/gamemaps/config.toml");
            }
        }

        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = std::env::var("APPDATA") {
                return PathBuf::from(appdata).join("gamemaps/config.toml");
            }
        }

        PathBuf::from(".gamemaps/config.toml")
    }
}
