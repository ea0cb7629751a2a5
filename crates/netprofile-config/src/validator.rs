//! Invariant checks that turn a candidate into a [`NetworkProfile`].
//!
//! Every check runs on every candidate and all failures are returned
//! together.

use crate::profile::{CandidateProfile, EndpointState, ForkingSpec, NetworkProfile};
use thiserror::Error;
use tracing::debug;

/// A single broken invariant on a candidate profile
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationDefect {
    /// A non-local network has no usable RPC endpoint
    #[error("missing RPC endpoint{}", missing_suffix(.missing_secrets))]
    MissingEndpoint { missing_secrets: Vec<String> },

    #[error("live network has no signer configured")]
    MissingSigner,

    #[error("fork must be pinned to a block greater than zero (got {block})")]
    InvalidForkBlock { block: u64 },

    #[error("forking cannot be enabled on a live network")]
    ConflictingForkAndLive,

    #[error("forking is enabled but the fork source endpoint is unavailable{}", missing_suffix(.missing_secrets))]
    MissingForkSource { missing_secrets: Vec<String> },

    #[error("declared chain id {declared} contradicts the registered chain id {known}")]
    ChainIdMismatch { declared: u64, known: u64 },
}

fn missing_suffix(missing: &[String]) -> String {
    if missing.is_empty() {
        String::new()
    } else {
        format!(" (unset secrets: {})", missing.join(", "))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileValidator;

impl ProfileValidator {
    pub fn new() -> Self {
        Self
    }

    /// Accept the candidate only if no defect is found
    pub fn validate(&self, candidate: CandidateProfile) -> Result<NetworkProfile, Vec<ValidationDefect>> {
        let defects = self.defects(&candidate);
        if !defects.is_empty() {
            debug!(
                network = %candidate.name,
                defects = defects.len(),
                "candidate profile rejected"
            );
            return Err(defects);
        }

        let forking = candidate
            .forking
            .filter(|fork| fork.enabled)
            .and_then(|fork| {
                fork.source.resolved().cloned().map(|source_url| ForkingSpec {
                    enabled: true,
                    source_url,
                    pinned_block: fork.pinned_block,
                })
            });

        Ok(NetworkProfile {
            rpc_url: candidate.endpoint.resolved().cloned(),
            name: candidate.name,
            chain_id: candidate.chain_id,
            signers: candidate.signers,
            is_live: candidate.is_live,
            persist_deployments: candidate.persist_deployments,
            tags: candidate.tags,
            forking,
            simulator: candidate.simulator,
        })
    }

    /// Every defect of `candidate`, in check order
    pub fn defects(&self, candidate: &CandidateProfile) -> Vec<ValidationDefect> {
        let mut defects = Vec::new();

        if candidate.category.is_live() {
            match &candidate.endpoint {
                EndpointState::Resolved(_) => {}
                EndpointState::Unresolved { missing, .. } => {
                    defects.push(ValidationDefect::MissingEndpoint {
                        missing_secrets: missing.clone(),
                    })
                }
                EndpointState::Absent => defects.push(ValidationDefect::MissingEndpoint {
                    missing_secrets: Vec::new(),
                }),
            }
        }

        if candidate.is_live && candidate.signers.is_empty() {
            defects.push(ValidationDefect::MissingSigner);
        }

        if let Some(fork) = candidate.forking.as_ref().filter(|fork| fork.enabled) {
            if fork.pinned_block == 0 {
                defects.push(ValidationDefect::InvalidForkBlock {
                    block: fork.pinned_block,
                });
            }
            if fork.source.resolved().is_none() {
                defects.push(ValidationDefect::MissingForkSource {
                    missing_secrets: fork.source.missing_secrets(),
                });
            }
            if candidate.is_live {
                defects.push(ValidationDefect::ConflictingForkAndLive);
            }
        }

        if let Some(known) = candidate.expected_chain_id {
            if known != candidate.chain_id {
                defects.push(ValidationDefect::ChainIdMismatch {
                    declared: candidate.chain_id,
                    known,
                });
            }
        }

        defects
    }
}
