use super::STAGING_TAG;
use crate::catalog::{NetworkCategory, NetworkDefinition};

fn mainnet(name: &str, chain_id: u64, url: &str) -> NetworkDefinition {
    NetworkDefinition::new(name, chain_id, NetworkCategory::Mainnet).with_endpoint(url)
}

fn testnet(name: &str, chain_id: u64, url: &str) -> NetworkDefinition {
    NetworkDefinition::new(name, chain_id, NetworkCategory::Testnet)
        .with_endpoint(url)
        .with_tags([STAGING_TAG])
}

/// Create EVM-compatible L1 and L2 definitions outside Ethereum itself
pub fn sidechain_networks() -> Vec<NetworkDefinition> {
    vec![
        testnet("moonbase", 1287, "https://rpc.testnet.moonbeam.network"),
        mainnet("binance", 56, "https://bsc-dataseed.binance.org/"),
        testnet("binancetest", 97, "https://data-seed-prebsc-1-s1.binance.org:8545/"),
        mainnet("polygon", 137, "https://polygon-rpc.com"),
        mainnet("fantom", 250, "https://rpcapi.fantom.network"),
        testnet("fantomtest", 4002, "https://rpc.testnet.fantom.network/"),
        mainnet("avalanche", 43114, "https://api.avax.network/ext/bc/C/rpc"),
        testnet("fuji", 43113, "https://api.avax-test.network/ext/bc/C/rpc"),
        testnet(
            "mumbai",
            80001,
            "https://polygon-mumbai.g.alchemy.com/v2/${ALCHEMY_API_KEY}",
        ),
        mainnet("huobi", 128, "https://http-mainnet.hecochain.com"),
        testnet("huobitest", 256, "https://http-testnet.hecochain.com"),
        mainnet("okex", 66, "http://okexchain-rpc1.okex.com:26659"),
        testnet("okextest", 65, "http://okexchaintest-rpc1.okex.com:26659"),
        mainnet("xdai", 100, "https://rpc.xdaichain.com"),
        mainnet("tomo", 88, "https://rpc.tomochain.com"),
        testnet("tomotest", 89, "https://rpc.testnet.tomochain.com"),
        mainnet("moonbeam", 1284, "https://rpc.api.moonbeam.network"),
        testnet("arbitrumgoerli", 421613, "https://goerli-rollup.arbitrum.io/rpc"),
        mainnet("arbitrumone", 42161, "https://arb1.arbitrum.io/rpc"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testnets_are_tagged_for_staging() {
        for definition in sidechain_networks() {
            assert!(definition.endpoint_template.is_some(), "{}", definition.name);
            match definition.category {
                NetworkCategory::Testnet => assert!(definition.has_tag(STAGING_TAG)),
                _ => assert!(definition.tags.is_empty()),
            }
        }
    }
}
