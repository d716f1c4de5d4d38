use crate::systemd::SystemdNetworkGenerator;
use crate::tests::test_config;
use tempfile::TempDir;
use vlanmgr_core::VlanRecord;

#[test]
fn generates_netdev_network_and_dropin() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let mut vlan = VlanRecord::new(20, "10.0.0.1/24");
    vlan.nat = true;
    vlan.forwarding = false;

    SystemdNetworkGenerator::new(&config)
        .generate(&[vlan])
        .unwrap();

    let netdev =
        std::fs::read_to_string(config.network_dir.join("20-vlan20.netdev")).unwrap();
    assert!(netdev.contains("Name=vlan20"));
    assert!(netdev.contains("Kind=vlan"));
    assert!(netdev.contains("Id=20"));

    let network =
        std::fs::read_to_string(config.network_dir.join("20-vlan20.network")).unwrap();
    assert!(network.contains("[Match]\nName=vlan20"));
    assert!(network.contains("Address=10.0.0.1/24"));
    assert!(network.contains("DHCPServer=no"));
    assert!(network.contains("IPMasquerade=yes"));
    assert!(network.contains("IPForward=no"));

    // No parent config on disk, so the conventional fallback name is used.
    let dropin = std::fs::read_to_string(
        config
            .network_dir
            .join("10-br0.network.d")
            .join("vlan-20.conf"),
    )
    .unwrap();
    assert_eq!(dropin, "[Network]\nVLAN=vlan20\n");
}

#[test]
fn dhcp_server_stays_off_even_with_dhcp_vlan() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let mut vlan = VlanRecord::new(30, "172.16.0.1/24");
    vlan.dhcp = true;

    SystemdNetworkGenerator::new(&config)
        .generate(&[vlan])
        .unwrap();

    let network =
        std::fs::read_to_string(config.network_dir.join("20-vlan30.network")).unwrap();
    // Leases come from Kea, never from networkd.
    assert!(network.contains("DHCPServer=no"));
    assert!(network.contains("IPMasquerade=no"));
    assert!(network.contains("IPForward=yes"));
}

#[test]
fn discovers_parent_config_by_content() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    std::fs::create_dir_all(&config.network_dir).unwrap();
    std::fs::write(
        config.network_dir.join("25-my-bridge.network"),
        "[Match]\nName=br0\n\n[Network]\nDHCP=yes\n",
    )
    .unwrap();
    std::fs::write(
        config.network_dir.join("30-other.network"),
        "[Match]\nName=eth1\n",
    )
    .unwrap();

    let generator = SystemdNetworkGenerator::new(&config);
    assert_eq!(generator.find_parent_config_file(), "25-my-bridge.network");

    generator
        .generate(&[VlanRecord::new(20, "10.0.0.1/24")])
        .unwrap();
    assert!(
        config
            .network_dir
            .join("25-my-bridge.network.d")
            .join("vlan-20.conf")
            .exists()
    );
}

#[test]
fn discovery_is_deterministic_with_multiple_matches() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    std::fs::create_dir_all(&config.network_dir).unwrap();
    std::fs::write(config.network_dir.join("50-b.network"), "Name=br0\n").unwrap();
    std::fs::write(config.network_dir.join("40-a.network"), "Name=br0\n").unwrap();

    // Sorted scan: the lexicographically first match wins.
    let generator = SystemdNetworkGenerator::new(&config);
    assert_eq!(generator.find_parent_config_file(), "40-a.network");
}

#[test]
fn regeneration_removes_stale_files() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let generator = SystemdNetworkGenerator::new(&config);

    generator
        .generate(&[
            VlanRecord::new(10, "10.10.0.1/24"),
            VlanRecord::new(20, "10.20.0.1/24"),
        ])
        .unwrap();
    assert!(config.network_dir.join("20-vlan10.netdev").exists());
    assert!(config.network_dir.join("20-vlan20.netdev").exists());

    // VLAN 10 deleted: regenerating must clean up its files.
    generator
        .generate(&[VlanRecord::new(20, "10.20.0.1/24")])
        .unwrap();
    assert!(!config.network_dir.join("20-vlan10.netdev").exists());
    assert!(!config.network_dir.join("20-vlan10.network").exists());
    assert!(
        !config
            .network_dir
            .join("10-br0.network.d")
            .join("vlan-10.conf")
            .exists()
    );
    assert!(config.network_dir.join("20-vlan20.netdev").exists());
}

#[test]
fn hand_written_configs_survive_cleanup() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    std::fs::create_dir_all(&config.network_dir).unwrap();
    std::fs::write(config.network_dir.join("10-br0.network"), "Name=br0\n").unwrap();

    let generator = SystemdNetworkGenerator::new(&config);
    generator
        .generate(&[VlanRecord::new(20, "10.0.0.1/24")])
        .unwrap();
    generator.generate(&[]).unwrap();

    assert!(config.network_dir.join("10-br0.network").exists());
    assert!(!config.network_dir.join("20-vlan20.netdev").exists());
}
