//! Tool settings: storage root and operation timeouts.
//!
//! Settings live in a TOML file under the platform config directory
//! (`~/.config/netsnap/settings.toml` on Linux). Every field has a default,
//! so a missing file is not an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::path::resolve_path;
use crate::error::{NetsnapError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Root directory for the before/after/diff namespace.
    pub storage_root: PathBuf,
    /// Bound on one eAPI request.
    pub eapi_timeout_secs: u64,
    /// Bound on one snapshot-store operation.
    pub storage_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_root: default_storage_root(),
            eapi_timeout_secs: 30,
            storage_timeout_secs: 10,
        }
    }
}

impl Settings {
    /// Load settings from the default location, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.is_file() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and parse one settings file. Relative paths inside it resolve
    /// against the file's directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading settings");
        let text = std::fs::read_to_string(path)?;
        let mut settings = Self::parse(&text)?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        settings.storage_root = resolve_path(&settings.storage_root, base_dir)?;
        Ok(settings)
    }

    /// Parse settings TOML.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| NetsnapError::ConfigParse(e.to_string()))
    }

    pub const fn eapi_timeout(&self) -> Duration {
        Duration::from_secs(self.eapi_timeout_secs)
    }

    pub const fn storage_timeout(&self) -> Duration {
        Duration::from_secs(self.storage_timeout_secs)
    }
}

/// Default settings file location under the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("netsnap").join("settings.toml"))
}

/// Default snapshot namespace under the platform data directory.
fn default_storage_root() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("netsnap")
        .join("snapshots")
}
