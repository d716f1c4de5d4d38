use crate::kea::KeaConfigGenerator;
use crate::nftables::NftablesGenerator;
use crate::reload::{ReloadOutcome, ServiceReloader};
use crate::systemd::SystemdNetworkGenerator;
use tracing::{info, warn};
use vlanmgr_core::{EngineConfig, Result, VlanError, VlanRecord};

/// Sequences the three generators, writes the forwarding sysctl and asks
/// the live services to reload. Generation and file writes are fatal;
/// each reload is best-effort so an environment missing some of the tools
/// (a test sandbox, a container build) still completes an apply.
pub struct ApplyOrchestrator {
    config: EngineConfig,
    reloader: Box<dyn ServiceReloader>,
}

impl ApplyOrchestrator {
    pub fn new(config: EngineConfig, reloader: Box<dyn ServiceReloader>) -> Self {
        Self { config, reloader }
    }

    pub fn apply(&self, vlans: &[VlanRecord]) -> Result<()> {
        SystemdNetworkGenerator::new(&self.config).generate(vlans)?;
        let ruleset_path = NftablesGenerator::new(&self.config).generate(vlans)?;
        KeaConfigGenerator::new(&self.config).generate(vlans)?;

        self.write_sysctl()?;

        let sysctl_file = self.config.sysctl_file.display().to_string();
        self.best_effort("sysctl", &["-p", &sysctl_file]);
        self.best_effort("networkctl", &["reload"]);
        let ruleset = ruleset_path.display().to_string();
        self.best_effort("nft", &["-f", &ruleset]);
        self.best_effort("systemctl", &["restart", &self.config.kea_service_name]);

        info!("Applied configuration for {} VLAN(s)", vlans.len());
        Ok(())
    }

    fn write_sysctl(&self) -> Result<()> {
        if let Some(parent) = self.config.sysctl_file.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.sysctl_error(e))?;
        }
        std::fs::write(&self.config.sysctl_file, "net.ipv4.ip_forward=1\n")
            .map_err(|e| self.sysctl_error(e))
    }

    fn sysctl_error(&self, e: std::io::Error) -> VlanError {
        VlanError::GenerationError {
            artifact: self.config.sysctl_file.display().to_string(),
            cause: e.to_string(),
        }
    }

    fn best_effort(&self, program: &str, args: &[&str]) {
        match self.reloader.reload(program, args) {
            ReloadOutcome::Succeeded => {}
            ReloadOutcome::Failed { status, stderr } => {
                warn!(
                    "{} failed (status {:?}): {}; continuing",
                    program,
                    status,
                    stderr.trim()
                );
            }
            ReloadOutcome::Unavailable => {
                warn!("{} not found; skipping", program);
            }
        }
    }
}
