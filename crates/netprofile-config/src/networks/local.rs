use crate::catalog::{
    ForkDefinition, NetworkCategory, NetworkDefinition, SimulatorSettings, LOCAL_PERSIST_TAG,
};

/// Hardfork the simulator runs unless coverage instrumentation is active
pub const DEFAULT_HARDFORK: &str = "london";

/// Hardfork used under coverage, whose gas price override predates EIP-1559
pub const COVERAGE_HARDFORK: &str = "berlin";

/// Create local simulation network definitions
pub fn local_networks() -> Vec<NetworkDefinition> {
    vec![
        NetworkDefinition::new("localhost", 31337, NetworkCategory::Local)
            .with_endpoint("http://127.0.0.1:8545")
            .with_tags(["local", LOCAL_PERSIST_TAG])
            .with_simulator(SimulatorSettings {
                hardfork: DEFAULT_HARDFORK.to_string(),
                block_gas_limit: None,
                allow_unlimited_contract_size: true,
            }),
        NetworkDefinition::new("hardhat", 31337, NetworkCategory::Local)
            .with_tags(["test", "local"])
            .with_forking(ForkDefinition {
                source_template: "https://eth-mainnet.alchemyapi.io/v2/${ALCHEMY_API_KEY}"
                    .to_string(),
                pinned_block: 15_759_970,
            })
            .with_simulator(SimulatorSettings {
                hardfork: DEFAULT_HARDFORK.to_string(),
                block_gas_limit: Some(10_000_000),
                allow_unlimited_contract_size: true,
            }),
    ]
}
