use crate::error::{Result, VlanError};
use ipnetwork::Ipv4Network;
use std::net::Ipv4Addr;

/// Parses an IPv4 prefix, keeping any host bits the caller supplied.
pub fn parse_cidr(id: u16, cidr: &str) -> Result<Ipv4Network> {
    cidr.trim().parse().map_err(|_| VlanError::InvalidCidr {
        id,
        cidr: cidr.to_string(),
    })
}

/// Base-address form of a possibly host-addressed prefix
/// (`192.168.10.1/24` -> `192.168.10.0/24`).
pub fn network_of(net: Ipv4Network) -> Ipv4Network {
    // Masking an already-valid prefix cannot fail.
    Ipv4Network::new(net.network(), net.prefix()).unwrap_or(net)
}

/// True when the address ranges of the two prefixes intersect in either
/// direction (equal, subset and superset all count).
pub fn networks_overlap(a: Ipv4Network, b: Ipv4Network) -> bool {
    network_of(a).overlaps(network_of(b))
}

/// Number of usable host addresses, excluding network and broadcast.
/// Zero for /31 and /32.
pub fn usable_hosts(net: Ipv4Network) -> u64 {
    if net.prefix() > 30 {
        return 0;
    }
    (1u64 << (32 - net.prefix())) - 2
}

/// The `index`th usable host (0-based), counting up from the first address
/// after the network base.
pub fn nth_host(net: Ipv4Network, index: u64) -> Option<Ipv4Addr> {
    if index >= usable_hosts(net) {
        return None;
    }
    let base = u32::from(net.network());
    Some(Ipv4Addr::from(base + 1 + index as u32))
}
