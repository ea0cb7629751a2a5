//! Secret material read from the process environment.
//!
//! A [`SecretSource`] is a pure, uncached key lookup. Absence is never an
//! error at this layer; the validator decides whether a missing value matters.

use crate::catalog::NetworkDefinition;
use crate::template;
use parking_lot::RwLock;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Environment variable holding the deployer's private key
pub const SIGNER_KEY_VAR: &str = "DEPLOYER_PRIVATE_KEY";

/// Environment variable holding the generic block-explorer API key
pub const EXPLORER_API_KEY_VAR: &str = "ETHERSCAN_API_KEY";

/// Environment variable holding the archive-node key used for forking
pub const FORKING_API_KEY_VAR: &str = "ALCHEMY_API_KEY";

/// Case-sensitive, side-effect-free secret lookup
pub trait SecretSource: Send + Sync {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<S: SecretSource + ?Sized> SecretSource for &S {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<S: SecretSource + ?Sized> SecretSource for Arc<S> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

/// Reads the live process environment on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretSource;

impl SecretSource for EnvSecretSource {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory secret source; values can be rotated between lookups
#[derive(Default)]
pub struct MapSecretSource {
    values: RwLock<BTreeMap<String, String>>,
}

impl fmt::Debug for MapSecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapSecretSource")
            .field("keys", &self.values.read().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl MapSecretSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(key.into(), value.into());
    }

    pub fn unset(&self, key: &str) {
        self.values.write().remove(key);
    }
}

impl SecretSource for MapSecretSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSecretSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }
}

/// A secret string whose `Debug` and `Serialize` forms never reveal the value
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue(String);

impl SecretValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short SHA-256 prefix, stable for a given value
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        format!("sha256:{}", hex::encode(&digest[..4]))
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretValue({})", self.fingerprint())
    }
}

impl Serialize for SecretValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.fingerprint())
    }
}

/// Secret material gathered for one resolution run.
///
/// Empty strings are treated the same as unset variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretBundle {
    pub signer_key: Option<SecretValue>,
    pub explorer_api_key: Option<SecretValue>,
    pub forking_api_key: Option<SecretValue>,
    /// Values for every `${NAME}` placeholder referenced by the definition's templates
    pub template_values: BTreeMap<String, SecretValue>,
}

impl SecretBundle {
    /// Read every secret `definition` could need from `source`
    pub fn collect<S: SecretSource + ?Sized>(source: &S, definition: &NetworkDefinition) -> Self {
        let mut template_values = BTreeMap::new();
        let templates = definition
            .endpoint_template
            .iter()
            .chain(definition.forking.iter().map(|f| &f.source_template));

        for template in templates {
            for key in template::placeholders(template) {
                if let Some(value) = non_empty(source, key) {
                    template_values.insert(key.to_string(), value);
                }
            }
        }

        Self {
            signer_key: non_empty(source, SIGNER_KEY_VAR),
            explorer_api_key: non_empty(source, EXPLORER_API_KEY_VAR),
            forking_api_key: non_empty(source, FORKING_API_KEY_VAR),
            template_values,
        }
    }

    /// Value substituted for a `${key}` placeholder
    pub fn template_value(&self, key: &str) -> Option<&SecretValue> {
        self.template_values.get(key).or(match key {
            SIGNER_KEY_VAR => self.signer_key.as_ref(),
            EXPLORER_API_KEY_VAR => self.explorer_api_key.as_ref(),
            FORKING_API_KEY_VAR => self.forking_api_key.as_ref(),
            _ => None,
        })
    }
}

pub(crate) fn non_empty<S: SecretSource + ?Sized>(source: &S, key: &str) -> Option<SecretValue> {
    source
        .lookup(key)
        .filter(|value| !value.is_empty())
        .map(SecretValue::new)
}
