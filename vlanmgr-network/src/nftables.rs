use std::path::PathBuf;
use tracing::info;
use vlanmgr_core::{EngineConfig, Result, VlanError, VlanRecord};

const TABLE_NAME: &str = "vlan_mgmt";

/// Renders one self-contained nftables ruleset covering every NAT-enabled
/// VLAN. The ruleset deletes and recreates its own table on load, so
/// re-applying it is idempotent and never touches unrelated tables.
pub struct NftablesGenerator {
    nftables_dir: PathBuf,
    include_file: String,
    wan_interface: String,
}

impl NftablesGenerator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            nftables_dir: config.nftables_dir.clone(),
            include_file: config.nftables_include_file.clone(),
            wan_interface: config.wan_interface.clone(),
        }
    }

    pub fn render(&self, vlans: &[VlanRecord]) -> String {
        let mut lines = Vec::new();
        // Declare before delete so the delete succeeds on a clean ruleset.
        lines.push(format!("table inet {TABLE_NAME}"));
        lines.push(format!("delete table inet {TABLE_NAME}"));
        lines.push(format!("table inet {TABLE_NAME} {{"));

        lines.push("  chain forward {".to_string());
        lines.push("    type filter hook forward priority 0; policy accept;".to_string());
        lines.push("    ct state established,related accept".to_string());
        for vlan in vlans.iter().filter(|v| v.nat) {
            lines.push(format!(
                "    iifname \"{}\" oifname \"{}\" accept",
                vlan.interface_name(),
                self.wan_interface
            ));
        }
        lines.push("  }".to_string());

        lines.push("  chain postrouting {".to_string());
        lines.push("    type nat hook postrouting priority 100; policy accept;".to_string());
        for vlan in vlans.iter().filter(|v| v.nat) {
            lines.push(format!(
                "    ip saddr {} oifname \"{}\" masquerade",
                vlan.cidr, self.wan_interface
            ));
        }
        lines.push("  }".to_string());
        lines.push("}".to_string());

        lines.join("\n")
    }

    /// Writes the ruleset include file and returns its path, for `nft -f`.
    pub fn generate(&self, vlans: &[VlanRecord]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.nftables_dir).map_err(|e| VlanError::GenerationError {
            artifact: "nftables directory".to_string(),
            cause: e.to_string(),
        })?;

        let path = self.nftables_dir.join(&self.include_file);
        std::fs::write(&path, self.render(vlans)).map_err(|e| VlanError::GenerationError {
            artifact: path.display().to_string(),
            cause: e.to_string(),
        })?;

        info!("Generated nftables ruleset at {}", path.display());
        Ok(path)
    }
}
