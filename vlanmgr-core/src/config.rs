use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Engine configuration, passed explicitly into each component so tests can
/// run multiple isolated instances. Populated by the embedding layer (web
/// UI, CLI); the core never reads the environment itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub data_file: PathBuf,
    pub network_dir: PathBuf,
    pub nftables_dir: PathBuf,
    pub nftables_include_file: String,
    pub sysctl_file: PathBuf,
    pub kea_config_file: PathBuf,
    pub kea_service_name: String,
    pub parent_interface: String,
    pub wan_interface: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("/var/lib/vlanmgr/vlans.json"),
            network_dir: PathBuf::from("/etc/systemd/network"),
            nftables_dir: PathBuf::from("/etc/nftables.d"),
            nftables_include_file: "vlans.nft".to_string(),
            sysctl_file: PathBuf::from("/etc/sysctl.d/99-vlanmgr.conf"),
            kea_config_file: PathBuf::from("/etc/kea/kea-dhcp4.conf"),
            kea_service_name: "kea-dhcp4-server".to_string(),
            parent_interface: "br0".to_string(),
            wan_interface: "eth0".to_string(),
        }
    }
}
