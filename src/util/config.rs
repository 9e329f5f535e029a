//! Configuration file support for anchorage.
//!
//! Two configuration file locations are read:
//! - Global: `~/.anchorage/config.toml` - User-wide defaults
//! - Project: `.anchorage/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::toolchain::{ArchBits, CompilerFamily, RuntimeLinkage, RuntimeMode, TargetOs};
use crate::util::fs::read_to_string;

/// anchorage configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Toolchain description; unset fields are detected
    pub toolchain: ToolchainSettings,

    /// Boost settings
    pub boost: BoostSettings,

    /// Default override file name per library family (`openssl = "..."`)
    pub overrides: BTreeMap<String, String>,
}

/// Toolchain settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// Path to the C++ compiler driver (e.g., /usr/bin/clang++)
    pub compiler: Option<PathBuf>,

    /// Compiler family
    pub family: Option<CompilerFamily>,

    /// Compiler version tag ("15" for VS 2017, "mgw71" for MinGW 7.1)
    pub version_tag: Option<String>,

    /// Target OS class
    pub target_os: Option<TargetOs>,

    /// Architecture width
    pub bits: Option<ArchBits>,

    /// Runtime library linkage
    pub linkage: Option<RuntimeLinkage>,

    /// Runtime library mode
    pub mode: Option<RuntimeMode>,
}

impl ToolchainSettings {
    /// Merge another settings block into this one (other takes precedence).
    pub fn merge(&mut self, other: ToolchainSettings) {
        if other.compiler.is_some() {
            self.compiler = other.compiler;
        }
        if other.family.is_some() {
            self.family = other.family;
        }
        if other.version_tag.is_some() {
            self.version_tag = other.version_tag;
        }
        if other.target_os.is_some() {
            self.target_os = other.target_os;
        }
        if other.bits.is_some() {
            self.bits = other.bits;
        }
        if other.linkage.is_some() {
            self.linkage = other.linkage;
        }
        if other.mode.is_some() {
            self.mode = other.mode;
        }
    }
}

/// Boost settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostSettings {
    /// Minimum accepted version (default 1.66.0)
    pub min_version: Option<semver::Version>,

    /// Libraries to link (default `boost_system`)
    pub components: Vec<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        self.toolchain.merge(other.toolchain);

        if other.boost.min_version.is_some() {
            self.boost.min_version = other.boost.min_version;
        }
        if !other.boost.components.is_empty() {
            self.boost.components = other.boost.components;
        }

        self.overrides.extend(other.overrides);
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.anchorage/config.toml)
/// 2. Global config (~/.anchorage/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global) = global_path {
        config.merge(Config::load_or_default(global));
    }
    config.merge(Config::load_or_default(project_path));

    config
}

/// Load the configuration that applies to `project_root`.
pub fn load_for_project(project_root: &Path) -> Config {
    load_config(
        global_config_path().as_deref(),
        &project_config_path(project_root),
    )
}

/// Get the global anchorage config directory (~/.anchorage).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".anchorage"))
}

/// Get the global config path (~/.anchorage/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.anchorage/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".anchorage").join("config.toml")
}
