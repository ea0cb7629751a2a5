//! Static registry of known networks.
//!
//! The catalog is built once at start-up and only read afterwards. Iteration
//! order is declaration order.

use crate::error::{ConfigError, ConfigResult, UnknownNetwork};
use crate::networks;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// Tag that makes a local network keep its deployment records
pub const LOCAL_PERSIST_TAG: &str = "local-persist";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkCategory {
    Local,
    Testnet,
    Mainnet,
}

impl NetworkCategory {
    /// Live networks carry real value and need a signer to deploy
    pub fn is_live(self) -> bool {
        !matches!(self, NetworkCategory::Local)
    }
}

impl fmt::Display for NetworkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkCategory::Local => write!(f, "local"),
            NetworkCategory::Testnet => write!(f, "testnet"),
            NetworkCategory::Mainnet => write!(f, "mainnet"),
        }
    }
}

impl FromStr for NetworkCategory {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(NetworkCategory::Local),
            "testnet" | "test" => Ok(NetworkCategory::Testnet),
            "mainnet" | "main" => Ok(NetworkCategory::Mainnet),
            _ => Err(ConfigError::InvalidFormat(format!(
                "Unknown network category: {}",
                s
            ))),
        }
    }
}

/// Forked-state source for a local simulation network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkDefinition {
    /// Archive endpoint, may contain `${NAME}` placeholders
    pub source_template: String,

    /// Block the fork is pinned to
    pub pinned_block: u64,
}

/// Behaviour knobs of a local simulation node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorSettings {
    /// EVM hardfork the simulator runs
    pub hardfork: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_gas_limit: Option<u64>,

    #[serde(default)]
    pub allow_unlimited_contract_size: bool,
}

/// One catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDefinition {
    pub name: String,

    pub chain_id: u64,

    pub category: NetworkCategory,

    /// RPC endpoint, may contain `${NAME}` placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_template: Option<String>,

    #[serde(default)]
    pub tags: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forking: Option<ForkDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulator: Option<SimulatorSettings>,
}

impl NetworkDefinition {
    pub fn new(name: impl Into<String>, chain_id: u64, category: NetworkCategory) -> Self {
        Self {
            name: name.into(),
            chain_id,
            category,
            endpoint_template: None,
            tags: BTreeSet::new(),
            forking: None,
            simulator: None,
        }
    }

    pub fn with_endpoint(mut self, template: impl Into<String>) -> Self {
        self.endpoint_template = Some(template.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_forking(mut self, forking: ForkDefinition) -> Self {
        self.forking = Some(forking);
        self
    }

    pub fn with_simulator(mut self, simulator: SimulatorSettings) -> Self {
        self.simulator = Some(simulator);
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Read-only, ordered collection of network definitions
#[derive(Debug, Clone)]
pub struct NetworkCatalog {
    definitions: Vec<NetworkDefinition>,
    index: HashMap<String, usize>,
}

impl NetworkCatalog {
    /// Build a catalog, rejecting duplicate names
    pub fn new(definitions: Vec<NetworkDefinition>) -> ConfigResult<Self> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (position, definition) in definitions.iter().enumerate() {
            if index.insert(definition.name.clone(), position).is_some() {
                return Err(ConfigError::DuplicateNetwork(definition.name.clone()));
            }
        }
        Ok(Self { definitions, index })
    }

    /// Catalog of every network this project deploys to
    pub fn builtin() -> ConfigResult<Self> {
        Self::new(networks::builtin_definitions())
    }

    pub fn get(&self, name: &str) -> Result<&NetworkDefinition, UnknownNetwork> {
        self.index
            .get(name)
            .map(|&position| &self.definitions[position])
            .ok_or_else(|| UnknownNetwork {
                name: name.to_string(),
                known: self.names(),
            })
    }

    /// Definitions in declaration order; each call starts afresh
    pub fn list(&self) -> std::slice::Iter<'_, NetworkDefinition> {
        self.definitions.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.definitions.iter().map(|d| d.name.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<'a> IntoIterator for &'a NetworkCatalog {
    type Item = &'a NetworkDefinition;
    type IntoIter = std::slice::Iter<'a, NetworkDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.list()
    }
}

/// Chain id publicly registered for a well-known network name
pub fn known_chain_id(name: &str) -> Option<u64> {
    let id = match name {
        "mainnet" => 1,
        "ropsten" => 3,
        "rinkeby" => 4,
        "goerli" => 5,
        "kovan" => 42,
        "binance" | "bsc" => 56,
        "okextest" => 65,
        "okex" => 66,
        "tomo" => 88,
        "tomotest" => 89,
        "binancetest" | "bsctestnet" => 97,
        "xdai" => 100,
        "huobi" => 128,
        "polygon" => 137,
        "fantom" => 250,
        "huobitest" => 256,
        "moonbeam" => 1284,
        "moonbase" => 1287,
        "fantomtest" => 4002,
        "hardhat" => 31337,
        "arbitrumone" => 42161,
        "fuji" => 43113,
        "avalanche" => 43114,
        "mumbai" => 80001,
        "arbitrumgoerli" => 421613,
        _ => return None,
    };
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<NetworkDefinition> {
        vec![
            NetworkDefinition::new("hardhat", 31337, NetworkCategory::Local),
            NetworkDefinition::new("goerli", 5, NetworkCategory::Testnet)
                .with_endpoint("https://goerli.infura.io/v3/${INFURA_API_KEY}")
                .with_tags(["staging"]),
            NetworkDefinition::new("mainnet", 1, NetworkCategory::Mainnet),
        ]
    }

    #[test]
    fn test_get_declared_network() {
        let catalog = NetworkCatalog::new(sample()).unwrap();
        let goerli = catalog.get("goerli").unwrap();
        assert_eq!(goerli.chain_id, 5);
        assert!(goerli.has_tag("staging"));
    }

    #[test]
    fn test_get_unknown_network_lists_names() {
        let catalog = NetworkCatalog::new(sample()).unwrap();
        let err = catalog.get("Goerli").unwrap_err();
        assert_eq!(err.name, "Goerli");
        assert_eq!(err.known, vec!["hardhat", "goerli", "mainnet"]);
    }

    #[test]
    fn test_list_is_ordered_and_restartable() {
        let catalog = NetworkCatalog::new(sample()).unwrap();
        let first: Vec<_> = catalog.list().map(|d| d.name.as_str()).collect();
        let second: Vec<_> = (&catalog).into_iter().map(|d| d.name.as_str()).collect();
        assert_eq!(first, vec!["hardhat", "goerli", "mainnet"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut definitions = sample();
        definitions.push(NetworkDefinition::new("goerli", 5, NetworkCategory::Testnet));
        let err = NetworkCatalog::new(definitions).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateNetwork(name) if name == "goerli"));
    }

    #[test]
    fn test_category_parsing_and_liveness() {
        assert_eq!("Mainnet".parse::<NetworkCategory>().unwrap(), NetworkCategory::Mainnet);
        assert_eq!("test".parse::<NetworkCategory>().unwrap(), NetworkCategory::Testnet);
        assert!("devnet".parse::<NetworkCategory>().is_err());
        assert!(!NetworkCategory::Local.is_live());
        assert!(NetworkCategory::Testnet.is_live());
        assert!(NetworkCategory::Mainnet.is_live());
    }

    #[test]
    fn test_known_chain_ids() {
        assert_eq!(known_chain_id("mainnet"), Some(1));
        assert_eq!(known_chain_id("binancetest"), Some(97));
        assert_eq!(known_chain_id("hardhat"), Some(31337));
        assert_eq!(known_chain_id("localhost"), None);
    }

    #[test]
    fn test_builtin_catalog_chain_ids_agree_with_registry() {
        let catalog = NetworkCatalog::builtin().unwrap();
        for definition in &catalog {
            if let Some(known) = known_chain_id(&definition.name) {
                assert_eq!(definition.chain_id, known, "{}", definition.name);
            }
        }
    }
}
