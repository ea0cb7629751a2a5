//! Named signer slots used by deployment scripts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEPLOYER: &str = "deployer";

/// Role name to index into a profile's signer sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamedAccounts(BTreeMap<String, usize>);

impl NamedAccounts {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, role: impl Into<String>, index: usize) -> Self {
        self.0.insert(role.into(), index);
        self
    }

    pub fn index_of(&self, role: &str) -> Option<usize> {
        self.0.get(role).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(role, index)| (role.as_str(), *index))
    }
}

impl Default for NamedAccounts {
    fn default() -> Self {
        Self::new().with(DEPLOYER, 0)
    }
}
