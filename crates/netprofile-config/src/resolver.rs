//! Single entry point for turning a network name into a validated profile.

use crate::accounts::NamedAccounts;
use crate::builder::ProfileBuilder;
use crate::catalog::{NetworkCatalog, NetworkDefinition};
use crate::compiler::{CompilerPolicies, CompilerPolicy};
use crate::error::{ConfigResult, ResolutionError};
use crate::loader::{CatalogFile, EnvLoader};
use crate::networks::DEFAULT_NETWORK;
use crate::profile::NetworkProfile;
use crate::secrets::{SecretBundle, SecretSource};
use crate::validator::ProfileValidator;
use crate::verification::{VerificationCredential, VerificationRegistry};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// A resolved profile together with the settings external tools need
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentPlan {
    pub profile: NetworkProfile,
    /// `None` means verification is skipped for this network
    pub verification: Option<VerificationCredential>,
    pub compilers: Vec<CompilerPolicy>,
    pub named_accounts: NamedAccounts,
}

/// Resolution facade over shared, read-only catalog state.
///
/// Secrets are re-read from `S` on every call; nothing is cached between
/// resolutions.
#[derive(Debug, Clone)]
pub struct Resolver<S> {
    catalog: Arc<NetworkCatalog>,
    compilers: Arc<CompilerPolicies>,
    verification: Arc<VerificationRegistry>,
    named_accounts: NamedAccounts,
    default_network: String,
    secrets: S,
}

impl<S: SecretSource> Resolver<S> {
    pub fn new(
        catalog: NetworkCatalog,
        compilers: CompilerPolicies,
        verification: VerificationRegistry,
        secrets: S,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            compilers: Arc::new(compilers),
            verification: Arc::new(verification),
            named_accounts: NamedAccounts::default(),
            default_network: DEFAULT_NETWORK.to_string(),
            secrets,
        }
    }

    /// Resolver over the built-in catalog, compilers and explorer families
    pub fn builtin(secrets: S) -> ConfigResult<Self> {
        Self::from_catalog_file(CatalogFile::builtin(), secrets)
    }

    /// Check every load-time invariant of `file` and build a resolver from it
    pub fn from_catalog_file(file: CatalogFile, secrets: S) -> ConfigResult<Self> {
        file.check_version()?;
        let catalog = NetworkCatalog::new(file.networks)?;
        let compilers = CompilerPolicies::new(file.compilers)?;
        let verification = VerificationRegistry::new(file.verification)?;
        catalog.get(&file.default_network)?;

        info!(
            networks = catalog.len(),
            compilers = compilers.len(),
            default_network = %file.default_network,
            "network catalog loaded"
        );

        Ok(Self {
            catalog: Arc::new(catalog),
            compilers: Arc::new(compilers),
            verification: Arc::new(verification),
            named_accounts: file.named_accounts,
            default_network: file.default_network,
            secrets,
        })
    }

    /// Same shared catalog state, different secret source
    pub fn with_secrets<T: SecretSource>(&self, secrets: T) -> Resolver<T> {
        Resolver {
            catalog: Arc::clone(&self.catalog),
            compilers: Arc::clone(&self.compilers),
            verification: Arc::clone(&self.verification),
            named_accounts: self.named_accounts.clone(),
            default_network: self.default_network.clone(),
            secrets,
        }
    }

    /// Resolve `name`, taking an endpoint override from `<NAME>_RPC_URL` if set
    pub fn resolve(&self, name: &str) -> Result<NetworkProfile, ResolutionError> {
        let override_url = EnvLoader::rpc_override(&self.secrets, name);
        self.resolve_with_override(name, override_url.as_deref())
    }

    pub fn resolve_with_override(
        &self,
        name: &str,
        override_url: Option<&str>,
    ) -> Result<NetworkProfile, ResolutionError> {
        debug!(network = %name, override_url = override_url.is_some(), "resolving network profile");

        let definition = self.catalog.get(name)?;
        let secrets = SecretBundle::collect(&self.secrets, definition);
        let builder = ProfileBuilder::new(EnvLoader::runtime_flags(&self.secrets));
        let candidate = builder.build(definition, &secrets, override_url);

        ProfileValidator::new()
            .validate(candidate)
            .map_err(|defects| ResolutionError::Invalid {
                network: name.to_string(),
                defects,
            })
    }

    pub fn resolve_default(&self) -> Result<NetworkProfile, ResolutionError> {
        self.resolve(&self.default_network)
    }

    /// Resolve `name` and attach verification, compiler and account settings
    pub fn plan(
        &self,
        name: &str,
        override_url: Option<&str>,
    ) -> Result<DeploymentPlan, ResolutionError> {
        let profile = match override_url {
            Some(url) => self.resolve_with_override(name, Some(url))?,
            None => self.resolve(name)?,
        };

        Ok(DeploymentPlan {
            verification: self.verification_credential(profile.name()),
            compilers: self.compilers.policies().to_vec(),
            named_accounts: self.named_accounts.clone(),
            profile,
        })
    }

    /// Catalog entries in declaration order
    pub fn list_networks(&self) -> std::slice::Iter<'_, NetworkDefinition> {
        self.catalog.list()
    }

    pub fn compiler_policies(&self) -> &[CompilerPolicy] {
        self.compilers.policies()
    }

    /// Policy for the highest declared compiler version
    pub fn latest_compiler(&self) -> Option<&CompilerPolicy> {
        self.compilers.latest()
    }

    pub fn verification_credential(&self, name: &str) -> Option<VerificationCredential> {
        self.verification.credential_for(name, &self.secrets)
    }

    pub fn catalog(&self) -> &NetworkCatalog {
        &self.catalog
    }

    pub fn verification_registry(&self) -> &VerificationRegistry {
        &self.verification
    }

    pub fn named_accounts(&self) -> &NamedAccounts {
        &self.named_accounts
    }

    pub fn default_network(&self) -> &str {
        &self.default_network
    }

    pub fn secrets(&self) -> &S {
        &self.secrets
    }
}
