mod apply;
mod kea;
mod nftables;
mod reload;
mod systemd;

pub use apply::ApplyOrchestrator;
pub use kea::KeaConfigGenerator;
pub use nftables::NftablesGenerator;
pub use reload::{ReloadOutcome, ServiceReloader, SystemReloader};
pub use systemd::SystemdNetworkGenerator;

use vlanmgr_core::{EngineConfig, Result, VlanRecord};

/// Regenerates every artifact and reloads the corresponding services using
/// the real system tools.
pub fn apply(config: &EngineConfig, vlans: &[VlanRecord]) -> Result<()> {
    ApplyOrchestrator::new(config.clone(), Box::new(SystemReloader)).apply(vlans)
}

#[cfg(test)]
mod tests;
