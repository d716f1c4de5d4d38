use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::info;
use vlanmgr_core::{EngineConfig, Result, VlanError, VlanRecord, network_of, parse_cidr};

/// Builds the kea-dhcp4 configuration for every DHCP-enabled VLAN. VLANs
/// without DHCP are entirely absent from the output, including the
/// interface bind list.
pub struct KeaConfigGenerator {
    config_file: PathBuf,
}

impl KeaConfigGenerator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            config_file: config.kea_config_file.clone(),
        }
    }

    pub fn build(&self, vlans: &[VlanRecord]) -> Result<Value> {
        let mut interfaces = Vec::new();
        let mut subnets = Vec::new();

        for vlan in vlans.iter().filter(|v| v.dhcp) {
            let network = network_of(parse_cidr(vlan.id, &vlan.cidr)?);
            let pools: Vec<Value> = vlan
                .dhcp_pools
                .as_deref()
                .unwrap_or("")
                .split(',')
                .map(str::trim)
                .filter(|range| !range.is_empty())
                .map(|range| json!({ "pool": range }))
                .collect();

            interfaces.push(vlan.interface_name());
            subnets.push(json!({
                "id": vlan.id,
                "subnet": network.to_string(),
                "interface": vlan.interface_name(),
                "pools": pools,
                "option-data": [
                    {
                        "name": "routers",
                        "data": vlan.dhcp_gateway.as_deref().unwrap_or_default(),
                    },
                    {
                        "name": "domain-name-servers",
                        "data": vlan.dhcp_dns.as_deref().unwrap_or_default(),
                    },
                ],
            }));
        }

        Ok(json!({
            "Dhcp4": {
                "interfaces-config": {
                    "interfaces": interfaces,
                },
                "control-socket": {
                    "socket-type": "unix",
                    "socket-name": "/run/kea/kea4-ctrl-socket",
                },
                "lease-database": {
                    "type": "memfile",
                    "persist": true,
                    "name": "/var/lib/kea/kea-leases4.csv",
                    "lfc-interval": 3600,
                },
                "valid-lifetime": 3600,
                "subnet4": subnets,
            }
        }))
    }

    pub fn generate(&self, vlans: &[VlanRecord]) -> Result<()> {
        let document = self.build(vlans)?;

        if let Some(parent) = self.config_file.parent() {
            std::fs::create_dir_all(parent).map_err(|e| VlanError::GenerationError {
                artifact: "kea config directory".to_string(),
                cause: e.to_string(),
            })?;
        }

        let content = serde_json::to_string_pretty(&document)?;
        std::fs::write(&self.config_file, content).map_err(|e| VlanError::GenerationError {
            artifact: self.config_file.display().to_string(),
            cause: e.to_string(),
        })?;

        info!("Generated Kea config at {}", self.config_file.display());
        Ok(())
    }
}
