//! Locates the configuration for a `check` run.
//!
//! An explicit `--config` path always wins. Otherwise the directory holding
//! the properties file is searched for `parent-version.toml`, then
//! `.parent-version.toml`, so a module's configuration travels with its
//! properties. With neither, the built-in defaults apply.

use parent_version_core::{Config, ConfigError};
use std::path::{Path, PathBuf};

/// Config file names looked up next to the properties file, in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["parent-version.toml", ".parent-version.toml"];

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found beside the properties file.
    Adjacent(PathBuf),
    /// Nothing found; built-in defaults.
    Default,
}

impl ConfigSource {
    /// Returns the config file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Adjacent(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Config, ConfigError> {
        match self.path() {
            Some(path) => Config::from_file(path),
            None => Ok(Config::default()),
        }
    }
}

/// Resolves the configuration for the properties file at `properties`.
#[must_use]
pub fn resolve(properties: &Path, explicit: Option<&Path>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    let dir = properties_dir(properties);
    PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, |found| {
            tracing::debug!("Found config beside properties: {}", found.display());
            ConfigSource::Adjacent(found)
        })
}

/// Directory containing `properties`; a bare file name lives in `.`.
fn properties_dir(properties: &Path) -> &Path {
    match properties.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}
