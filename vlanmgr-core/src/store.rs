use crate::dhcp::derive_dhcp_defaults;
use crate::error::{Result, VlanError};
use crate::overlap::{check_overlaps, log_overlaps};
use crate::types::{VlanRecord, validate_vlan_id};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, info};

/// The persisted collection of VLAN definitions. The mutex serializes every
/// read-modify-write sequence against the backing file; the file itself is
/// rewritten in full (write-temp-then-rename) on each mutation.
pub struct VlanStore {
    data_file: PathBuf,
    pub(crate) vlans: Mutex<Vec<VlanRecord>>,
}

impl VlanStore {
    /// Opens the store, loading whatever is persisted at `data_file`. A
    /// missing file means an empty set; an unreadable or malformed file is
    /// logged and also yields an empty set, so startup never fails here.
    /// Overlap violations in persisted state are logged, not raised.
    pub fn open(data_file: impl Into<PathBuf>) -> Self {
        let data_file = data_file.into();
        let vlans = Self::load(&data_file);
        log_overlaps(&vlans);
        Self {
            data_file,
            vlans: Mutex::new(vlans),
        }
    }

    fn load(data_file: &Path) -> Vec<VlanRecord> {
        if !data_file.exists() {
            return Vec::new();
        }
        let content = match std::fs::read_to_string(data_file) {
            Ok(content) => content,
            Err(e) => {
                error!("Failed to read VLAN store {}: {}", data_file.display(), e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(vlans) => vlans,
            Err(e) => {
                error!("Failed to parse VLAN store {}: {}", data_file.display(), e);
                Vec::new()
            }
        }
    }

    /// Current record set, insertion order preserved. Generators rely on
    /// this order for deterministic output.
    pub fn list(&self) -> Vec<VlanRecord> {
        self.guard().clone()
    }

    // A poisoned lock still holds a coherent Vec (every mutation commits
    // it whole after a successful persist), so recover the guard instead
    // of propagating the panic.
    fn guard(&self) -> std::sync::MutexGuard<'_, Vec<VlanRecord>> {
        self.vlans
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Validates, derives DHCP defaults, checks the candidate set for
    /// overlap, then persists. Either everything succeeds or the prior
    /// state is left untouched.
    pub fn add(&self, mut record: VlanRecord) -> Result<VlanRecord> {
        let mut vlans = self.guard();

        validate_vlan_id(record.id)?;
        if vlans.iter().any(|v| v.id == record.id) {
            return Err(VlanError::DuplicateVlanId { id: record.id });
        }
        crate::cidr::parse_cidr(record.id, &record.cidr)?;

        derive_dhcp_defaults(&mut record)?;

        let mut candidate = vlans.clone();
        candidate.push(record.clone());
        check_overlaps(&candidate)?;

        self.persist(&candidate)?;
        *vlans = candidate;
        info!("Added VLAN {} ({})", record.id, record.cidr);
        Ok(record)
    }

    /// Removes every record with the given id. Absent ids are a no-op, not
    /// an error.
    pub fn delete(&self, id: u16) -> Result<()> {
        let mut vlans = self.guard();
        let remaining: Vec<VlanRecord> = vlans.iter().filter(|v| v.id != id).cloned().collect();
        if remaining.len() != vlans.len() {
            info!("Deleted VLAN {}", id);
        }
        self.persist(&remaining)?;
        *vlans = remaining;
        Ok(())
    }

    fn persist(&self, vlans: &[VlanRecord]) -> Result<()> {
        let parent = self.data_file.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent).map_err(|e| self.persistence_error(e))?;

        let content = serde_json::to_string_pretty(vlans)?;

        // Write to a sibling temp file and rename over the target so a
        // crash can never leave a half-written store behind.
        let mut tmp =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| self.persistence_error(e))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| self.persistence_error(e))?;
        tmp.persist(&self.data_file)
            .map_err(|e| self.persistence_error(e.error))?;
        Ok(())
    }

    fn persistence_error(&self, e: std::io::Error) -> VlanError {
        VlanError::PersistenceError {
            path: self.data_file.clone(),
            cause: e.to_string(),
        }
    }
}
