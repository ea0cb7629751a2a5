//! Composes a catalog definition, secret material and an optional endpoint
//! override into a candidate profile.
//!
//! Building never fails. Anything wrong with the inputs is carried on the
//! candidate so the validator can report every defect together.

use crate::catalog::{known_chain_id, NetworkDefinition, LOCAL_PERSIST_TAG};
use crate::networks::local::COVERAGE_HARDFORK;
use crate::profile::{CandidateFork, CandidateProfile, EndpointState, ResolvedUrl};
use crate::secrets::SecretBundle;
use crate::template;
use tracing::trace;

/// Process-level switches that alter how local networks are built
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeFlags {
    /// Run the local simulator on a fork of its configured source chain
    pub forking_enabled: bool,
    /// Coverage instrumentation is active
    pub code_coverage: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileBuilder {
    flags: RuntimeFlags,
}

impl ProfileBuilder {
    pub fn new(flags: RuntimeFlags) -> Self {
        Self { flags }
    }

    pub fn build(
        &self,
        definition: &NetworkDefinition,
        secrets: &SecretBundle,
        override_url: Option<&str>,
    ) -> CandidateProfile {
        let is_live = definition.category.is_live();

        let endpoint = match override_url.filter(|url| !url.is_empty()) {
            Some(url) => EndpointState::Resolved(ResolvedUrl::overridden(url)),
            None => match &definition.endpoint_template {
                Some(template) => render_endpoint(template, secrets),
                None => EndpointState::Absent,
            },
        };

        let signers = match (&secrets.signer_key, is_live) {
            (Some(key), true) => vec![key.clone()],
            _ => Vec::new(),
        };

        let forking = definition.forking.as_ref().map(|fork| CandidateFork {
            enabled: self.flags.forking_enabled,
            source: render_endpoint(&fork.source_template, secrets),
            pinned_block: fork.pinned_block,
        });

        let simulator = definition.simulator.clone().map(|mut simulator| {
            if self.flags.code_coverage {
                simulator.hardfork = COVERAGE_HARDFORK.to_string();
            }
            simulator
        });

        trace!(
            network = %definition.name,
            live = is_live,
            signers = signers.len(),
            "built candidate profile"
        );

        CandidateProfile {
            name: definition.name.clone(),
            category: definition.category,
            chain_id: definition.chain_id,
            expected_chain_id: known_chain_id(&definition.name),
            endpoint,
            signers,
            is_live,
            persist_deployments: is_live || definition.has_tag(LOCAL_PERSIST_TAG),
            tags: definition.tags.clone(),
            forking,
            simulator,
        }
    }
}

fn render_endpoint(template: &str, secrets: &SecretBundle) -> EndpointState {
    let has_placeholders = !template::placeholders(template).is_empty();
    match template::render(template, |key| secrets.template_value(key).map(|v| v.expose())) {
        Ok(url) if has_placeholders => EndpointState::Resolved(ResolvedUrl::rendered(url, template)),
        Ok(url) => EndpointState::Resolved(ResolvedUrl::plain(url)),
        Err(missing) => EndpointState::Unresolved {
            template: template.to_string(),
            missing,
        },
    }
}
