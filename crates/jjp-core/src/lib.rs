pub mod config;
pub mod logging;

// Provisioning engine
pub mod crumb;
pub mod error;
pub mod folders;
pub mod http;
pub mod jobspec;
pub mod probe;
pub mod provision;
pub mod render;
pub mod target;

pub use error::ProvisionError;

/// Crate-wide result type.
pub type Result<T, E = ProvisionError> = std::result::Result<T, E>;
