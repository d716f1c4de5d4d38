use crate::cidr::{nth_host, parse_cidr, usable_hosts};
use crate::error::Result;
use crate::types::VlanRecord;
use tracing::debug;

/// Fills in DHCP defaults for a record with `dhcp` enabled. Only fields
/// that are absent or empty are touched:
/// - gateway: the literal address component of `cidr` (not the network base)
/// - dns: same address as the gateway
/// - pools: one range covering the last 80% of the usable hosts, leaving
///   the low end of the address space free for static assignments
pub fn derive_dhcp_defaults(record: &mut VlanRecord) -> Result<()> {
    if !record.dhcp {
        return Ok(());
    }

    let network = parse_cidr(record.id, &record.cidr)?;
    let interface_addr = network.ip().to_string();

    if record.dhcp_gateway.as_deref().is_none_or(str::is_empty) {
        record.dhcp_gateway = Some(interface_addr.clone());
    }
    if record.dhcp_dns.as_deref().is_none_or(str::is_empty) {
        record.dhcp_dns = Some(interface_addr);
    }
    if record.dhcp_pools.as_deref().is_none_or(str::is_empty) {
        record.dhcp_pools = Some(default_pool(network));
        debug!(
            "VLAN {}: derived DHCP pool {:?}",
            record.id, record.dhcp_pools
        );
    }

    Ok(())
}

/// `floor(N * 0.8)` addresses at the high end of the host list, rendered
/// as `"start - end"`. Empty when the prefix has no usable hosts worth
/// pooling (/31, /32).
fn default_pool(network: ipnetwork::Ipv4Network) -> String {
    let hosts = usable_hosts(network);
    let pool_size = hosts * 4 / 5;
    if pool_size == 0 {
        return String::new();
    }

    // Both indices are in range by construction.
    let start = nth_host(network, hosts - pool_size);
    let end = nth_host(network, hosts - 1);
    match (start, end) {
        (Some(start), Some(end)) => format!("{start} - {end}"),
        _ => String::new(),
    }
}
