//! Static catalog of operational checks.
//!
//! A check maps a name to exactly one eAPI show command, an owning group for
//! bulk selection, and an optional reshape of the raw payload. The registry
//! is a sorted static slice looked up by key; an unknown name is a reported
//! error, never an evaluation failure.

mod reshape;

use serde_json::Value;
use tracing::warn;

use crate::device::CommandChannel;
use crate::error::{NetsnapError, Result};

/// Bulk-selection group a check belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckGroup {
    /// Management plane: time, SNMP.
    Mgmt,
    /// Routing protocols and tables.
    Routing,
    /// Switching, interfaces and overlays.
    Layer2,
    /// Traffic filters.
    Filter,
}

impl CheckGroup {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mgmt => "mgmt",
            Self::Routing => "routing",
            Self::Layer2 => "layer2",
            Self::Filter => "filter",
        }
    }
}

impl std::fmt::Display for CheckGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CheckGroup {
    type Err = NetsnapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mgmt" => Ok(Self::Mgmt),
            "routing" => Ok(Self::Routing),
            "layer2" => Ok(Self::Layer2),
            "filter" => Ok(Self::Filter),
            other => Err(NetsnapError::UnknownGroup {
                name: other.to_string(),
            }),
        }
    }
}

/// How a check's raw payload is shaped before storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reshape {
    /// Store the structured result as returned.
    Raw,
    /// Flatten NTP associations into key/value text lines.
    NtpAssociations,
    /// Flatten SNMP notification hosts into key/value text lines.
    SnmpHosts,
}

/// One named operational check.
#[derive(Debug, Clone, Copy)]
pub struct CheckDef {
    pub name: &'static str,
    pub command: &'static str,
    pub group: CheckGroup,
    pub reshape: Reshape,
}

/// All known checks, sorted by name.
pub const REGISTRY: &[CheckDef] = &[
    CheckDef {
        name: "acl",
        command: "show ip access-lists",
        group: CheckGroup::Filter,
        reshape: Reshape::Raw,
    },
    CheckDef {
        name: "arp",
        command: "show ip arp",
        group: CheckGroup::Routing,
        reshape: Reshape::Raw,
    },
    CheckDef {
        name: "as_path",
        command: "show ip as-path access-list",
        group: CheckGroup::Routing,
        reshape: Reshape::Raw,
    },
    CheckDef {
        name: "bfd",
        command: "show bfd peers",
        group: CheckGroup::Routing,
        reshape: Reshape::Raw,
    },
    CheckDef {
        name: "bgp_evpn",
        command: "show bgp evpn",
        group: CheckGroup::Routing,
        reshape: Reshape::Raw,
    },
    CheckDef {
        name: "bgp_ipv4",
        command: "show bgp ipv4 unicast",
        group: CheckGroup::Routing,
        reshape: Reshape::Raw,
    },
    CheckDef {
        name: "interface",
        command: "show interfaces",
        group: CheckGroup::Layer2,
        reshape: Reshape::Raw,
    },
    CheckDef {
        name: "ip_route",
        command: "show ip route detail",
        group: CheckGroup::Routing,
        reshape: Reshape::Raw,
    },
    CheckDef {
        name: "lldp",
        command: "show lldp neighbors",
        group: CheckGroup::Layer2,
        reshape: Reshape::Raw,
    },
    CheckDef {
        name: "mlag",
        command: "show mlag",
        group: CheckGroup::Layer2,
        reshape: Reshape::Raw,
    },
    CheckDef {
        name: "ntp",
        command: "show ntp associations",
        group: CheckGroup::Mgmt,
        reshape: Reshape::NtpAssociations,
    },
    CheckDef {
        name: "prefix_list",
        command: "show ip prefix-list",
        group: CheckGroup::Routing,
        reshape: Reshape::Raw,
    },
    CheckDef {
        name: "route_map",
        command: "show route-map",
        group: CheckGroup::Routing,
        reshape: Reshape::Raw,
    },
    CheckDef {
        name: "snmp",
        command: "show snmp host",
        group: CheckGroup::Mgmt,
        reshape: Reshape::SnmpHosts,
    },
    CheckDef {
        name: "stp",
        command: "show spanning-tree topology status detail",
        group: CheckGroup::Layer2,
        reshape: Reshape::Raw,
    },
    CheckDef {
        name: "vlan",
        command: "show vlan",
        group: CheckGroup::Layer2,
        reshape: Reshape::Raw,
    },
    CheckDef {
        name: "vrf",
        command: "show vrf",
        group: CheckGroup::Routing,
        reshape: Reshape::Raw,
    },
    CheckDef {
        name: "vxlan",
        command: "show interfaces vxlan 1",
        group: CheckGroup::Layer2,
        reshape: Reshape::Raw,
    },
];

/// Look up a check by name.
pub fn lookup(name: &str) -> Result<&'static CheckDef> {
    REGISTRY
        .binary_search_by(|check| check.name.cmp(name))
        .map(|index| &REGISTRY[index])
        .map_err(|_| NetsnapError::UnknownCheck {
            name: name.to_string(),
        })
}

/// Resolve a selection of explicit check names and/or a group name.
///
/// The group name "all" selects the whole registry.
pub fn select(names: &[String], group: Option<&str>) -> Result<Vec<&'static CheckDef>> {
    if let Some(group_name) = group {
        if group_name == "all" {
            return Ok(REGISTRY.iter().collect());
        }
        let group: CheckGroup = group_name.parse()?;
        return Ok(REGISTRY.iter().filter(|c| c.group == group).collect());
    }

    names.iter().map(|name| lookup(name)).collect()
}

/// Execute one check over a channel.
///
/// A platform that rejects the command is a soft failure: the check still
/// produces a snapshot payload (null), and the run continues.
pub fn run(check: &CheckDef, channel: &dyn CommandChannel) -> Result<Value> {
    match channel.execute(check.command) {
        Ok(payload) => Ok(reshape::apply(check.reshape, payload)),
        Err(NetsnapError::CommandUnsupported { command }) => {
            warn!(
                node = channel.node_name(),
                check = check.name,
                command = %command,
                "Command not supported by platform, recording null result"
            );
            Ok(Value::Null)
        }
        Err(other) => Err(other),
    }
}
