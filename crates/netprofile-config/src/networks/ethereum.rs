use super::STAGING_TAG;
use crate::catalog::{NetworkCategory, NetworkDefinition};

fn infura(subdomain: &str) -> String {
    format!("https://{}.infura.io/v3/${{INFURA_API_KEY}}", subdomain)
}

/// Create Ethereum mainnet and testnet definitions
pub fn ethereum_networks() -> Vec<NetworkDefinition> {
    vec![
        NetworkDefinition::new("mainnet", 1, NetworkCategory::Mainnet).with_endpoint(infura("mainnet")),
        NetworkDefinition::new("ropsten", 3, NetworkCategory::Testnet)
            .with_endpoint(infura("ropsten"))
            .with_tags([STAGING_TAG]),
        NetworkDefinition::new("rinkeby", 4, NetworkCategory::Testnet)
            .with_endpoint(infura("rinkeby"))
            .with_tags([STAGING_TAG]),
        NetworkDefinition::new("goerli", 5, NetworkCategory::Testnet)
            .with_endpoint(infura("goerli"))
            .with_tags([STAGING_TAG]),
        NetworkDefinition::new("kovan", 42, NetworkCategory::Testnet)
            .with_endpoint(infura("kovan"))
            .with_tags([STAGING_TAG]),
    ]
}
