pub mod cidr;
pub mod config;
pub mod dhcp;
pub mod error;
pub mod overlap;
pub mod store;
pub mod types;

pub use cidr::*;
pub use config::*;
pub use dhcp::*;
pub use error::*;
pub use overlap::*;
pub use store::VlanStore;
pub use types::*;
