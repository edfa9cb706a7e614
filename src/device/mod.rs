//! Device command channel abstraction.
//!
//! This module provides a trait-based abstraction over the real eAPI
//! transport and a mock implementation, enabling testability without a
//! reachable switch.

mod eapi;
pub mod mock;

pub use eapi::EapiChannel;
pub use mock::MockChannel;

use serde_json::Value;

use crate::error::Result;

/// One command-execution capability against one device.
///
/// Implementations return the structured result body for the command — the
/// decoded mapping/sequence/scalar tree, not raw text.
pub trait CommandChannel {
    /// Inventory name of the device this channel talks to.
    fn node_name(&self) -> &str;

    /// Execute one CLI command and return its structured result.
    ///
    /// # Errors
    ///
    /// [`crate::error::NetsnapError::CommandUnsupported`] when the platform
    /// rejects the command (callers treat this as a soft failure);
    /// transport and protocol failures otherwise.
    fn execute(&self, command: &str) -> Result<Value>;
}

/// Type alias for boxed trait object.
pub type BoxedChannel = Box<dyn CommandChannel>;
