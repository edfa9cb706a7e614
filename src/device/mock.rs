//! Mock command channel for unit testing.
//!
//! Records every executed command and serves canned responses, so capture
//! and compare flows can be exercised without a reachable device.
//!
//! # Example
//!
//! ```rust,ignore
//! use netsnap::device::{CommandChannel, MockChannel};
//! use serde_json::json;
//!
//! let mock = MockChannel::new("spine1")
//!     .with_response("show ntp associations", json!({"peers": {}}))
//!     .with_unsupported("show interfaces vxlan 1");
//!
//! let result = mock.execute("show ntp associations").unwrap();
//! mock.assert_executed(&["show ntp associations"]);
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use serde_json::Value;
use tracing::trace;

use super::CommandChannel;
use crate::error::{NetsnapError, Result};

/// Mock channel serving canned command responses.
pub struct MockChannel {
    node: String,
    responses: HashMap<String, Value>,
    unsupported: HashSet<String>,
    command_log: Mutex<Vec<String>>,
    error_injection: Mutex<Option<NetsnapError>>,
}

impl MockChannel {
    /// Create a mock channel for a named node with no canned responses.
    pub fn new(node: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            responses: HashMap::new(),
            unsupported: HashSet::new(),
            command_log: Mutex::new(Vec::new()),
            error_injection: Mutex::new(None),
        }
    }

    /// Register a canned response for a command.
    #[must_use]
    pub fn with_response(mut self, command: impl Into<String>, response: Value) -> Self {
        self.responses.insert(command.into(), response);
        self
    }

    /// Mark a command as unsupported by the simulated platform.
    #[must_use]
    pub fn with_unsupported(mut self, command: impl Into<String>) -> Self {
        self.unsupported.insert(command.into());
        self
    }

    /// Inject an error to be returned by the next execute call.
    pub fn inject_error(&self, error: NetsnapError) {
        *self.error_injection.lock().unwrap() = Some(error);
    }

    /// Commands executed so far, in order.
    pub fn executed_commands(&self) -> Vec<String> {
        self.command_log.lock().unwrap().clone()
    }

    /// Assert the exact sequence of executed commands.
    pub fn assert_executed(&self, expected: &[&str]) {
        let log = self.command_log.lock().unwrap();
        let actual: Vec<&str> = log.iter().map(String::as_str).collect();
        assert_eq!(actual, expected, "command log mismatch");
    }
}

impl CommandChannel for MockChannel {
    fn node_name(&self) -> &str {
        &self.node
    }

    fn execute(&self, command: &str) -> Result<Value> {
        trace!(node = %self.node, command, "Mock execute");
        self.command_log.lock().unwrap().push(command.to_string());

        if let Some(error) = self.error_injection.lock().unwrap().take() {
            return Err(error);
        }

        if self.unsupported.contains(command) {
            return Err(NetsnapError::CommandUnsupported {
                command: command.to_string(),
            });
        }

        self.responses.get(command).cloned().ok_or_else(|| {
            NetsnapError::EapiCommand {
                command: command.to_string(),
                message: "no canned response registered".to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canned_response() {
        let mock = MockChannel::new("spine1")
            .with_response("show vlan", json!({"vlans": {"100": {"name": "servers"}}}));

        let result = mock.execute("show vlan").unwrap();
        assert_eq!(result["vlans"]["100"]["name"], "servers");
        mock.assert_executed(&["show vlan"]);
    }

    #[test]
    fn test_unsupported_command() {
        let mock = MockChannel::new("leaf1").with_unsupported("show interfaces vxlan 1");
        let err = mock.execute("show interfaces vxlan 1").unwrap_err();
        assert!(matches!(err, NetsnapError::CommandUnsupported { .. }));
    }

    #[test]
    fn test_unknown_command_is_protocol_error() {
        let mock = MockChannel::new("leaf1");
        let err = mock.execute("show mystery").unwrap_err();
        assert!(matches!(err, NetsnapError::EapiCommand { .. }));
    }

    #[test]
    fn test_error_injection_fires_once() {
        let mock = MockChannel::new("leaf1").with_response("show mlag", json!({}));
        mock.inject_error(NetsnapError::EapiTransport {
            node: "leaf1".to_string(),
            reason: "connection refused".to_string(),
        });

        assert!(mock.execute("show mlag").is_err());
        assert!(mock.execute("show mlag").is_ok());
        assert_eq!(mock.executed_commands().len(), 2);
    }
}
