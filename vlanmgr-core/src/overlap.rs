use crate::cidr::{networks_overlap, parse_cidr};
use crate::error::{Result, VlanError};
use crate::types::VlanRecord;
use ipnetwork::Ipv4Network;
use tracing::warn;

/// Checks an ordered set of records for pairwise network overlap. Each
/// record is compared against all previously-accepted ones; the first
/// conflict found aborts the check. Order only decides which conflict is
/// reported first.
pub fn check_overlaps(records: &[VlanRecord]) -> Result<()> {
    let mut accepted: Vec<(u16, Ipv4Network)> = Vec::with_capacity(records.len());

    for record in records {
        let network = parse_cidr(record.id, &record.cidr)?;
        for (other_id, other_network) in &accepted {
            if networks_overlap(network, *other_network) {
                return Err(VlanError::OverlappingNetwork {
                    id: record.id,
                    network,
                    other_id: *other_id,
                    other_network: *other_network,
                });
            }
        }
        accepted.push((record.id, network));
    }

    Ok(())
}

/// Load-time variant: violations are logged, never raised, so a corrupted
/// or hand-edited store stays usable.
pub fn log_overlaps(records: &[VlanRecord]) {
    if let Err(e) = check_overlaps(records) {
        warn!("Persisted VLAN set fails validation: {}", e);
    }
}
