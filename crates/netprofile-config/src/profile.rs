//! Candidate and validated network profiles.

use crate::catalog::{NetworkCategory, SimulatorSettings};
use crate::secrets::SecretValue;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// An endpoint URL after placeholder substitution.
///
/// When the URL was rendered from a template, `Debug` and `Serialize` show
/// the template so embedded API keys never leave the process.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    url: String,
    template: Option<String>,
}

impl ResolvedUrl {
    /// A URL that embeds no secret material
    pub fn plain(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            template: None,
        }
    }

    /// A URL rendered from `template`
    pub fn rendered(url: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            template: Some(template.into()),
        }
    }

    /// A URL supplied whole by the operator. Anything past the host may carry
    /// a provider token, so only `scheme://host/***` is ever shown.
    pub fn overridden(url: impl Into<String>) -> Self {
        let url = url.into();
        let masked = mask_after_host(&url);
        Self {
            url,
            template: Some(masked),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Printable form with secrets masked
    pub fn display_form(&self) -> &str {
        self.template.as_deref().unwrap_or(&self.url)
    }
}

fn mask_after_host(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, url),
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    // userinfo may hold basic-auth credentials
    let host = authority.rsplit('@').next().unwrap_or_default();
    match scheme {
        Some(scheme) => format!("{scheme}://{host}/***"),
        None => format!("{host}/***"),
    }
}

impl fmt::Debug for ResolvedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.display_form())
    }
}

impl Serialize for ResolvedUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_form())
    }
}

/// Endpoint as produced by the builder, before judgement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointState {
    Resolved(ResolvedUrl),
    /// Template referenced secrets that were not available
    Unresolved {
        template: String,
        missing: Vec<String>,
    },
    Absent,
}

impl EndpointState {
    pub fn resolved(&self) -> Option<&ResolvedUrl> {
        match self {
            EndpointState::Resolved(url) => Some(url),
            _ => None,
        }
    }

    /// Secrets the template needed but did not get
    pub fn missing_secrets(&self) -> Vec<String> {
        match self {
            EndpointState::Unresolved { missing, .. } => missing.clone(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFork {
    pub enabled: bool,
    pub source: EndpointState,
    pub pinned_block: u64,
}

/// Unvalidated profile; may violate any invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateProfile {
    pub name: String,
    pub category: NetworkCategory,
    pub chain_id: u64,
    /// Chain id registered for this name, when one is known
    pub expected_chain_id: Option<u64>,
    pub endpoint: EndpointState,
    pub signers: Vec<SecretValue>,
    pub is_live: bool,
    pub persist_deployments: bool,
    pub tags: BTreeSet<String>,
    pub forking: Option<CandidateFork>,
    pub simulator: Option<SimulatorSettings>,
}

/// Pinned fork of a live chain for deterministic local runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForkingSpec {
    pub enabled: bool,
    pub source_url: ResolvedUrl,
    pub pinned_block: u64,
}

/// Fully resolved and validated configuration for one network.
///
/// Only the validator constructs these, so every instance satisfies the
/// profile invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkProfile {
    pub(crate) name: String,
    pub(crate) chain_id: u64,
    pub(crate) rpc_url: Option<ResolvedUrl>,
    pub(crate) signers: Vec<SecretValue>,
    pub(crate) is_live: bool,
    pub(crate) persist_deployments: bool,
    pub(crate) tags: BTreeSet<String>,
    pub(crate) forking: Option<ForkingSpec>,
    pub(crate) simulator: Option<SimulatorSettings>,
}

impl NetworkProfile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn rpc_url(&self) -> Option<&ResolvedUrl> {
        self.rpc_url.as_ref()
    }

    /// Signing credentials in priority order; empty for local networks
    pub fn signers(&self) -> &[SecretValue] {
        &self.signers
    }

    pub fn is_live(&self) -> bool {
        self.is_live
    }

    pub fn persist_deployments(&self) -> bool {
        self.persist_deployments
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn forking(&self) -> Option<&ForkingSpec> {
        self.forking.as_ref()
    }

    pub fn simulator(&self) -> Option<&SimulatorSettings> {
        self.simulator.as_ref()
    }
}
