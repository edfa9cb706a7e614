//! Error types for netsnap operations.

use thiserror::Error;

use crate::snapshot::Category;

/// Primary error type for snapshot and diff operations.
#[derive(Error, Debug)]
pub enum NetsnapError {
    // Inventory errors
    #[error("Inventory file not found (searched: {searched:?})")]
    InventoryNotFound { searched: Vec<String> },

    #[error("Inventory parse error: {0}")]
    InventoryParse(String),

    #[error("Node not found in inventory: {name}")]
    NodeNotFound { name: String },

    // Device errors
    #[error("eAPI transport error for {node}: {reason}")]
    EapiTransport { node: String, reason: String },

    #[error("eAPI rejected command '{command}': {message}")]
    EapiCommand { command: String, message: String },

    #[error("Command not supported by platform: {command}")]
    CommandUnsupported { command: String },

    // Check errors
    #[error("Unknown check: {name}")]
    UnknownCheck { name: String },

    #[error("Unknown check group: {name}")]
    UnknownGroup { name: String },

    // Snapshot store errors
    #[error("No {category} snapshot for check '{check}' on '{node}' with id {capture_id}")]
    SnapshotNotFound {
        category: Category,
        check: String,
        node: String,
        capture_id: u64,
    },

    #[error("Snapshot file {path} is not valid JSON: {reason}")]
    MalformedSnapshot { path: String, reason: String },

    #[error("before id {before} must be lower than after id {after}")]
    IdentityOrdering { before: u64, after: u64 },

    #[error("Snapshot storage unavailable: {reason}")]
    StorageUnavailable { reason: String },

    // Configuration errors
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl NetsnapError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InventoryNotFound { .. }
                | Self::NodeNotFound { .. }
                | Self::UnknownCheck { .. }
                | Self::UnknownGroup { .. }
                | Self::SnapshotNotFound { .. }
                | Self::IdentityOrdering { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InventoryNotFound { .. } => {
                Some("Pass --inventory or create .eos_inventory.yaml in the working directory")
            }
            Self::NodeNotFound { .. } => Some("Check the node name against the inventory file"),
            Self::UnknownCheck { .. } | Self::UnknownGroup { .. } => {
                Some("Run: netsnap checks")
            }
            Self::SnapshotNotFound { .. } => {
                Some("Run: netsnap snapshots (capture ids are listed per check and node)")
            }
            Self::IdentityOrdering { .. } => {
                Some("Capture 'before' first; its id must be lower than the 'after' id")
            }
            _ => None,
        }
    }
}

/// Convenience type alias for Results using NetsnapError.
pub type Result<T> = std::result::Result<T, NetsnapError>;
