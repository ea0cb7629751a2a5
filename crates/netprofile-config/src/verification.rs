//! Block-explorer verification credentials.
//!
//! Networks are grouped into explorer families that share one API key. A
//! missing key is not an error; callers skip verification and decide how to
//! report it.

use crate::error::{ConfigError, ConfigResult};
use crate::secrets::{self, SecretSource, SecretValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Explorers sharing one API key, with each member network's explorer id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerFamily {
    pub name: String,

    /// Environment variable holding the family's API key
    pub api_key_var: String,

    /// Network name to the identifier the verification client expects
    #[serde(default)]
    pub networks: BTreeMap<String, String>,
}

impl ExplorerFamily {
    pub fn new(name: impl Into<String>, api_key_var: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_key_var: api_key_var.into(),
            networks: BTreeMap::new(),
        }
    }

    pub fn with_network(mut self, network: impl Into<String>, explorer_id: impl Into<String>) -> Self {
        self.networks.insert(network.into(), explorer_id.into());
        self
    }
}

/// Credential handed to the explorer-verification client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationCredential {
    pub family: String,
    pub explorer_id: String,
    pub api_key: SecretValue,
}

#[derive(Debug, Clone, Default)]
pub struct VerificationRegistry {
    families: Vec<ExplorerFamily>,
    by_network: HashMap<String, usize>,
}

impl VerificationRegistry {
    /// Build a registry; a network may belong to at most one family
    pub fn new(families: Vec<ExplorerFamily>) -> ConfigResult<Self> {
        let mut by_network: HashMap<String, usize> = HashMap::new();
        for (position, family) in families.iter().enumerate() {
            for network in family.networks.keys() {
                if let Some(previous) = by_network.insert(network.clone(), position) {
                    return Err(ConfigError::ConflictingVerificationFamily {
                        network: network.clone(),
                        first: families[previous].name.clone(),
                        second: family.name.clone(),
                    });
                }
            }
        }
        Ok(Self {
            families,
            by_network,
        })
    }

    pub fn builtin() -> ConfigResult<Self> {
        Self::new(builtin_families())
    }

    pub fn family_for(&self, network: &str) -> Option<&ExplorerFamily> {
        self.by_network
            .get(network)
            .map(|&position| &self.families[position])
    }

    pub fn families(&self) -> &[ExplorerFamily] {
        &self.families
    }

    /// Current credential for `network`, if its family's key is set
    pub fn credential_for<S: SecretSource + ?Sized>(
        &self,
        network: &str,
        source: &S,
    ) -> Option<VerificationCredential> {
        let family = self.family_for(network)?;
        let api_key = secrets::non_empty(source, &family.api_key_var)?;
        Some(VerificationCredential {
            family: family.name.clone(),
            explorer_id: family.networks.get(network)?.clone(),
            api_key,
        })
    }
}

/// Explorer families of the networks in the built-in catalog
pub fn builtin_families() -> Vec<ExplorerFamily> {
    vec![
        ExplorerFamily::new("etherscan", secrets::EXPLORER_API_KEY_VAR)
            .with_network("mainnet", "mainnet")
            .with_network("ropsten", "ropsten")
            .with_network("rinkeby", "rinkeby")
            .with_network("goerli", "goerli")
            .with_network("kovan", "kovan"),
        ExplorerFamily::new("bscscan", "BSC_API_KEY")
            .with_network("binance", "bsc")
            .with_network("binancetest", "bscTestnet"),
        ExplorerFamily::new("polygonscan", "POLYGON_API_KEY")
            .with_network("polygon", "polygon")
            .with_network("mumbai", "polygonMumbai"),
        ExplorerFamily::new("snowtrace", "AVALANCHE_API_KEY")
            .with_network("avalanche", "avalanche")
            .with_network("fuji", "avalancheFujiTestnet"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::MapSecretSource;

    #[test]
    fn test_shared_family_credential() {
        let registry = VerificationRegistry::builtin().unwrap();
        let source = MapSecretSource::new().with("BSC_API_KEY", "bsc-key");

        let mainnet = registry.credential_for("binance", &source).unwrap();
        let testnet = registry.credential_for("binancetest", &source).unwrap();
        assert_eq!(mainnet.api_key, testnet.api_key);
        assert_eq!(mainnet.family, "bscscan");
        assert_eq!(mainnet.explorer_id, "bsc");
        assert_eq!(testnet.explorer_id, "bscTestnet");
    }

    #[test]
    fn test_absent_credential_is_none() {
        let registry = VerificationRegistry::builtin().unwrap();
        let source = MapSecretSource::new().with("POLYGON_API_KEY", "");
        assert!(registry.credential_for("polygon", &source).is_none());
        assert!(registry.credential_for("goerli", &source).is_none());
        assert!(registry.credential_for("hardhat", &source).is_none());
    }

    #[test]
    fn test_network_in_two_families_rejected() {
        let families = vec![
            ExplorerFamily::new("a", "A_KEY").with_network("polygon", "polygon"),
            ExplorerFamily::new("b", "B_KEY").with_network("polygon", "polygon"),
        ];
        let err = VerificationRegistry::new(families).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ConflictingVerificationFamily { ref network, ref first, ref second }
                if network == "polygon" && first == "a" && second == "b"
        ));
    }
}
