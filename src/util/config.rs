//! Configuration file support for Berth.
//!
//! Berth reads two configuration file locations:
//! - Global: `~/.berth/config.toml` - User-wide defaults
//! - Project: `.berth/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::platform::Platform;

/// Berth configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target settings
    pub target: TargetConfig,

    /// Manifest generation settings
    pub manifest: ManifestConfig,
}

/// Target platform settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Target triple products are built for (e.g., aarch64-apple-darwin)
    pub triple: Option<String>,
}

/// Manifest generation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Crate path the generated `check_deps()` calls `can_load` on
    pub runtime_crate: Option<String>,

    /// Package named in rebuild instructions
    pub package: Option<String>,

    /// Default output path for the generated manifest
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.target.triple.is_some() {
            self.target.triple = other.target.triple;
        }

        if other.manifest.runtime_crate.is_some() {
            self.manifest.runtime_crate = other.manifest.runtime_crate;
        }
        if other.manifest.package.is_some() {
            self.manifest.package = other.manifest.package;
        }
        if other.manifest.output.is_some() {
            self.manifest.output = other.manifest.output;
        }
    }

    /// Target platform: the configured triple, or the host.
    pub fn platform(&self) -> Result<Platform> {
        match &self.target.triple {
            Some(triple) => Platform::from_triple(triple)
                .with_context(|| format!("invalid target triple in config: {}", triple)),
            None => Ok(Platform::host()),
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.berth/config.toml)
/// 2. Global config (~/.berth/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global berth config directory (~/.berth).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".berth"))
}

/// Get the global config path (~/.berth/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.berth/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".berth").join("config.toml")
}
