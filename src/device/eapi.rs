//! Blocking eAPI (JSON-RPC over HTTP) command channel.

use std::time::Duration;

use serde_json::{Value, json};
use tracing::{debug, trace};

use super::CommandChannel;
use crate::config::NodeConfig;
use crate::error::{NetsnapError, Result};

/// JSON-RPC error codes eAPI uses for commands the platform cannot run:
/// 1002 is "invalid command" (unknown on this platform), 1004 is
/// "incompatible command". Registry commands are well-formed, so either one
/// means the feature is absent rather than the request malformed.
const UNSUPPORTED_CODES: [i64; 2] = [1002, 1004];

/// Channel to one Arista device over the eAPI `runCmds` endpoint.
pub struct EapiChannel {
    client: reqwest::blocking::Client,
    endpoint: String,
    node: String,
    username: String,
    password: String,
}

impl EapiChannel {
    /// Build a channel for an inventory node. No request is made until the
    /// first [`CommandChannel::execute`] call.
    pub fn connect(name: &str, config: &NodeConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            // Lab switches ship self-signed certificates.
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| NetsnapError::EapiTransport {
                node: name.to_string(),
                reason: e.to_string(),
            })?;

        let endpoint = format!(
            "{}://{}:{}/command-api",
            config.transport.scheme(),
            config.host,
            config.effective_port(),
        );
        debug!(node = name, endpoint = %endpoint, "eAPI channel ready");

        Ok(Self {
            client,
            endpoint,
            node: name.to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn transport_error(&self, reason: impl ToString) -> NetsnapError {
        NetsnapError::EapiTransport {
            node: self.node.clone(),
            reason: reason.to_string(),
        }
    }
}

impl CommandChannel for EapiChannel {
    fn node_name(&self) -> &str {
        &self.node
    }

    fn execute(&self, command: &str) -> Result<Value> {
        trace!(node = %self.node, command, "Running eAPI command");

        // Privileged mode first, then the show command, exactly as the CLI
        // session would run them.
        let request = json!({
            "jsonrpc": "2.0",
            "method": "runCmds",
            "params": {
                "version": 1,
                "cmds": ["enable", command],
                "format": "json",
            },
            "id": "netsnap",
        });

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .json(&request)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.transport_error(format!("HTTP {status}")));
        }

        let body: Value = response.json().map_err(|e| self.transport_error(e))?;

        if let Some(error) = body.get("error") {
            let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown eAPI error")
                .to_string();
            if UNSUPPORTED_CODES.contains(&code) {
                return Err(NetsnapError::CommandUnsupported {
                    command: command.to_string(),
                });
            }
            return Err(NetsnapError::EapiCommand {
                command: command.to_string(),
                message,
            });
        }

        // The result array holds one entry per command; the last entry is
        // the show command's structured body.
        body.get("result")
            .and_then(Value::as_array)
            .and_then(|results| results.last())
            .cloned()
            .ok_or_else(|| NetsnapError::EapiCommand {
                command: command.to_string(),
                message: "response carried no result".to_string(),
            })
    }
}
