use ipnetwork::Ipv4Network;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VlanError {
    #[error("Invalid VLAN ID: {0}")]
    InvalidVlanId(String),

    #[error("VLAN ID must be between 1 and 4094, got {id}")]
    VlanIdOutOfRange { id: u16 },

    #[error("VLAN ID {id} already exists")]
    DuplicateVlanId { id: u16 },

    #[error("Invalid CIDR format for VLAN {id}: {cidr}")]
    InvalidCidr { id: u16, cidr: String },

    #[error("VLAN {id} ({network}) overlaps with VLAN {other_id} ({other_network})")]
    OverlappingNetwork {
        id: u16,
        network: Ipv4Network,
        other_id: u16,
        other_network: Ipv4Network,
    },

    #[error("Persistence error at {}: {cause}", .path.display())]
    PersistenceError { path: PathBuf, cause: String },

    #[error("Failed to generate {artifact}: {cause}")]
    GenerationError { artifact: String, cause: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, VlanError>;
