use std::path::{Path, PathBuf};
use tracing::{debug, info};
use vlanmgr_core::{EngineConfig, Result, VlanError, VlanRecord};

/// Prefix for generated files. Sorts after the conventional `10-` base
/// configs, so per-VLAN settings overlay hand-written parent configuration
/// instead of replacing it.
const GENERATED_PREFIX: &str = "20-";

/// Renders per-VLAN .netdev/.network files plus a drop-in fragment per VLAN
/// under the parent interface's config. Generation is full-replace: all
/// previously generated files are removed first, so deleted VLANs leave no
/// stale artifacts behind.
pub struct SystemdNetworkGenerator {
    network_dir: PathBuf,
    parent_interface: String,
}

impl SystemdNetworkGenerator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            network_dir: config.network_dir.clone(),
            parent_interface: config.parent_interface.clone(),
        }
    }

    pub fn generate(&self, vlans: &[VlanRecord]) -> Result<()> {
        std::fs::create_dir_all(&self.network_dir)
            .map_err(|e| generation_error("network directory", e))?;

        let parent_file = self.find_parent_config_file();
        let dropin_dir = self.network_dir.join(format!("{parent_file}.d"));
        std::fs::create_dir_all(&dropin_dir).map_err(|e| generation_error("drop-in directory", e))?;

        self.cleanup(&dropin_dir)?;

        for vlan in vlans {
            self.write_netdev(vlan)?;
            self.write_network(vlan)?;
            self.write_dropin(&dropin_dir, vlan)?;
        }

        info!(
            "Generated systemd-networkd config for {} VLAN(s) under {}",
            vlans.len(),
            self.network_dir.display()
        );
        Ok(())
    }

    /// Scans `.network` files for one whose content matches the parent
    /// interface by name. Filenames are visited in sorted order so the
    /// result is deterministic for a given directory state; the first hit
    /// wins. Falls back to the conventional filename when nothing matches.
    pub fn find_parent_config_file(&self) -> String {
        let fallback = format!("10-{}.network", self.parent_interface);
        let Ok(entries) = std::fs::read_dir(&self.network_dir) else {
            return fallback;
        };

        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| name.ends_with(".network"))
            .collect();
        names.sort();

        let needle = format!("Name={}", self.parent_interface);
        for name in names {
            let Ok(content) = std::fs::read_to_string(self.network_dir.join(&name)) else {
                continue;
            };
            if content.contains(&needle) {
                debug!("Parent config for {}: {}", self.parent_interface, name);
                return name;
            }
        }
        fallback
    }

    fn cleanup(&self, dropin_dir: &Path) -> Result<()> {
        let generated = format!("{GENERATED_PREFIX}vlan");
        if let Ok(entries) = std::fs::read_dir(&self.network_dir) {
            for entry in entries.filter_map(|e| e.ok()) {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                if name.starts_with(&generated)
                    && (name.ends_with(".netdev") || name.ends_with(".network"))
                {
                    let _ = std::fs::remove_file(entry.path());
                }
            }
        }
        if let Ok(entries) = std::fs::read_dir(dropin_dir) {
            for entry in entries.filter_map(|e| e.ok()) {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                if name.starts_with("vlan-") && name.ends_with(".conf") {
                    let _ = std::fs::remove_file(entry.path());
                }
            }
        }
        Ok(())
    }

    fn write_netdev(&self, vlan: &VlanRecord) -> Result<()> {
        let name = vlan.interface_name();
        let content = format!(
            "[NetDev]\n\
             Name={name}\n\
             Kind=vlan\n\
             \n\
             [VLAN]\n\
             Id={}\n",
            vlan.id
        );
        let path = self
            .network_dir
            .join(format!("{GENERATED_PREFIX}{name}.netdev"));
        std::fs::write(&path, content).map_err(|e| generation_error(&path.display().to_string(), e))
    }

    fn write_network(&self, vlan: &VlanRecord) -> Result<()> {
        let name = vlan.interface_name();
        // DHCP on the interface itself stays off; leases are served by Kea.
        let content = format!(
            "[Match]\n\
             Name={name}\n\
             \n\
             [Network]\n\
             Address={}\n\
             DHCPServer=no\n\
             IPMasquerade={}\n\
             IPForward={}\n",
            vlan.cidr,
            yes_no(vlan.nat),
            yes_no(vlan.forwarding),
        );
        let path = self
            .network_dir
            .join(format!("{GENERATED_PREFIX}{name}.network"));
        std::fs::write(&path, content).map_err(|e| generation_error(&path.display().to_string(), e))
    }

    fn write_dropin(&self, dropin_dir: &Path, vlan: &VlanRecord) -> Result<()> {
        let content = format!("[Network]\nVLAN={}\n", vlan.interface_name());
        let path = dropin_dir.join(format!("vlan-{}.conf", vlan.id));
        std::fs::write(&path, content).map_err(|e| generation_error(&path.display().to_string(), e))
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn generation_error(artifact: &str, e: std::io::Error) -> VlanError {
    VlanError::GenerationError {
        artifact: artifact.to_string(),
        cause: e.to_string(),
    }
}
