use crate::error::{Result, VlanError};
use serde::{Deserialize, Serialize};

pub const VLAN_ID_MIN: u16 = 1;
pub const VLAN_ID_MAX: u16 = 4094;

/// One managed VLAN. The `cidr` field is stored exactly as supplied and may
/// carry an interface address (e.g. `192.168.10.1/24`); the network itself
/// is always derived by masking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VlanRecord {
    pub id: u16,
    pub cidr: String,
    #[serde(default)]
    pub dhcp: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dhcp_gateway: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dhcp_dns: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dhcp_pools: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_servers: Option<String>,
    #[serde(default = "default_forwarding")]
    pub forwarding: bool,
    #[serde(default)]
    pub nat: bool,
}

fn default_forwarding() -> bool {
    true
}

impl VlanRecord {
    pub fn new(id: u16, cidr: impl Into<String>) -> Self {
        Self {
            id,
            cidr: cidr.into(),
            dhcp: false,
            dhcp_gateway: None,
            dhcp_dns: None,
            dhcp_pools: None,
            dns_servers: None,
            forwarding: true,
            nat: false,
        }
    }

    /// Interface name this VLAN maps to, e.g. `vlan10`.
    pub fn interface_name(&self) -> String {
        format!("vlan{}", self.id)
    }
}

/// Parses an id supplied by the boundary layer. Non-numeric input is a
/// distinct failure from an out-of-range value.
pub fn parse_vlan_id(raw: &str) -> Result<u16> {
    let id: u16 = raw
        .trim()
        .parse()
        .map_err(|_| VlanError::InvalidVlanId(raw.to_string()))?;
    validate_vlan_id(id)?;
    Ok(id)
}

pub fn validate_vlan_id(id: u16) -> Result<()> {
    if !(VLAN_ID_MIN..=VLAN_ID_MAX).contains(&id) {
        return Err(VlanError::VlanIdOutOfRange { id });
    }
    Ok(())
}
