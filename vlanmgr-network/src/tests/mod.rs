mod systemd_tests;

use tempfile::TempDir;
use vlanmgr_core::EngineConfig;

// Helper to build a config rooted in a throwaway directory.
pub(crate) fn test_config(dir: &TempDir) -> EngineConfig {
    EngineConfig {
        data_file: dir.path().join("vlans.json"),
        network_dir: dir.path().join("network"),
        nftables_dir: dir.path().join("nftables"),
        nftables_include_file: "vlans.nft".to_string(),
        sysctl_file: dir.path().join("sysctl/99-vlanmgr.conf"),
        kea_config_file: dir.path().join("kea/kea-dhcp4.conf"),
        kea_service_name: "kea-dhcp4-server".to_string(),
        parent_interface: "br0".to_string(),
        wan_interface: "eth0".to_string(),
    }
}
