//! Payload reshaping for checks that flatten selected attributes.
//!
//! A few checks reduce the raw command output to flat `"key: value\n"` text
//! lines, keeping only the attributes whose drift matters (an NTP peer's
//! stratum, an SNMP host's community) and dropping counters that change on
//! every poll. A payload that does not match the expected shape degrades to
//! the raw result instead of failing the capture.

use anyhow::Context;
use serde_json::Value;
use tracing::warn;

use super::Reshape;

/// Apply a reshape to a raw payload.
pub fn apply(reshape: Reshape, payload: Value) -> Value {
    let reshaped = match reshape {
        Reshape::Raw => return payload,
        Reshape::NtpAssociations => ntp_associations(&payload),
        Reshape::SnmpHosts => snmp_hosts(&payload),
    };

    match reshaped {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Reshape failed, keeping raw payload");
            payload
        }
    }
}

/// Flatten `show ntp associations` output: one line each for the peer name,
/// its address, stratum and latest reachability sample.
fn ntp_associations(payload: &Value) -> anyhow::Result<Value> {
    let mut lines = Vec::new();

    let tables = payload
        .as_object()
        .context("ntp associations payload is not a mapping")?;
    for table in tables.values() {
        let peers = table
            .as_object()
            .context("ntp peer table is not a mapping")?;
        for (peer, attributes) in peers {
            lines.push(format!("peers: {peer}\n"));
            lines.push(format!(
                "peerIpAddr: {}\n",
                render(attributes.get("peerIpAddr"))
            ));
            lines.push(format!(
                "stratumLevel: {}\n",
                render(attributes.get("stratumLevel"))
            ));
            let latest_sample = attributes
                .get("reachabilityHistory")
                .and_then(Value::as_array)
                .and_then(|history| history.first());
            lines.push(format!("reachabilityHistory: {}\n", render(latest_sample)));
        }
    }

    Ok(Value::Array(lines.into_iter().map(Value::String).collect()))
}

/// Flatten `show snmp host` output: one line per notification-host
/// attribute worth tracking.
fn snmp_hosts(payload: &Value) -> anyhow::Result<Value> {
    let mut lines = Vec::new();

    let tables = payload
        .as_object()
        .context("snmp host payload is not a mapping")?;
    for table in tables.values() {
        let hosts = table.as_array().context("snmp host table is not a sequence")?;
        for attributes in hosts {
            lines.push(format!(
                "communityString: {}\n",
                render(attributes.pointer("/v1v2cParams/communityString"))
            ));
            lines.push(format!("vrf: {}\n", render(attributes.get("vrf"))));
            lines.push(format!(
                "protocolVersion: {}\n",
                render(attributes.get("protocolVersion"))
            ));
            lines.push(format!("hostname: {}\n", render(attributes.get("hostname"))));
            lines.push(format!(
                "notificationType: {}\n",
                render(attributes.get("notificationType"))
            ));
            lines.push(format!("port: {}\n", render(attributes.get("port"))));
        }
    }

    Ok(Value::Array(lines.into_iter().map(Value::String).collect()))
}

/// Render a scalar attribute for a text line; strings lose their quotes,
/// everything else keeps its JSON spelling.
fn render(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}
