//! Device inventory loading.
//!
//! The inventory is a YAML mapping from node names to eAPI connection
//! parameters:
//!
//! ```yaml
//! nodes:
//!   spine1:
//!     host: 10.1.1.1
//!     username: admin
//!     password: secret
//!   leaf1:
//!     host: 10.1.1.10
//!     username: admin
//!     password: secret
//!     transport: http
//!     port: 8080
//! ```
//!
//! Search order: an explicit path (the `--inventory` flag), the
//! `NETSNAP_INVENTORY` environment variable, then `.eos_inventory.yaml` /
//! `.eos_inventory.yml` in the working directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{NetsnapError, Result};

/// Environment variable overriding the inventory path.
pub const INVENTORY_ENV: &str = "NETSNAP_INVENTORY";

/// Working-directory file names probed when nothing else is given.
const SEARCH_PATHS: [&str; 2] = [".eos_inventory.yaml", ".eos_inventory.yml"];

/// eAPI transport scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Http,
    #[default]
    Https,
}

impl Transport {
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    pub const fn default_port(self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }
}

/// Connection parameters for one device.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub transport: Transport,
}

impl NodeConfig {
    /// The configured port, or the transport default.
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.transport.default_port())
    }
}

/// The loaded device inventory.
#[derive(Debug, Clone, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeConfig>,
}

impl Inventory {
    /// Load the inventory, following the documented search order.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        if let Ok(env_path) = std::env::var(INVENTORY_ENV) {
            return Self::from_path(Path::new(&env_path));
        }

        for candidate in SEARCH_PATHS {
            let path = PathBuf::from(candidate);
            if path.is_file() {
                return Self::from_path(&path);
            }
        }

        Err(NetsnapError::InventoryNotFound {
            searched: SEARCH_PATHS.iter().map(ToString::to_string).collect(),
        })
    }

    /// Load and parse one inventory file.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading inventory");
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NetsnapError::InventoryNotFound {
                    searched: vec![path.display().to_string()],
                }
            } else {
                NetsnapError::Io(e)
            }
        })?;
        Self::parse(&text)
    }

    /// Parse inventory YAML.
    pub fn parse(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| NetsnapError::InventoryParse(e.to_string()))
    }

    /// Look up a node by its inventory name.
    pub fn node(&self, name: &str) -> Result<&NodeConfig> {
        self.nodes.get(name).ok_or_else(|| NetsnapError::NodeNotFound {
            name: name.to_string(),
        })
    }
}
