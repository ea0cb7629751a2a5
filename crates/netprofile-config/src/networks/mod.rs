//! Built-in network presets, grouped by chain family

pub mod ethereum;
pub mod local;
pub mod sidechains;

use crate::catalog::NetworkDefinition;

/// Network used when the caller does not name one
pub const DEFAULT_NETWORK: &str = "hardhat";

/// Tag carried by public test deployments
pub const STAGING_TAG: &str = "staging";

pub use ethereum::ethereum_networks;
pub use local::local_networks;
pub use sidechains::sidechain_networks;

/// Every built-in definition in declaration order
pub fn builtin_definitions() -> Vec<NetworkDefinition> {
    let mut definitions = local_networks();
    definitions.extend(ethereum_networks());
    definitions.extend(sidechain_networks());
    definitions
}
