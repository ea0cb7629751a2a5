//! Compiler versions available to the compilation pipeline.
//!
//! Several versions coexist because older contracts pin older compilers.
//! Which source file goes to which version is decided downstream.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Optimizer run count used when a policy does not set one
pub const DEFAULT_OPTIMIZER_RUNS: u32 = 200;

fn default_runs() -> u32 {
    DEFAULT_OPTIMIZER_RUNS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerPolicy {
    pub version: String,

    #[serde(default)]
    pub optimizer_enabled: bool,

    #[serde(default = "default_runs")]
    pub optimizer_runs: u32,

    /// Additional compiler outputs, e.g. `storageLayout`
    #[serde(default)]
    pub extra_outputs: BTreeSet<String>,
}

impl CompilerPolicy {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            optimizer_enabled: false,
            optimizer_runs: DEFAULT_OPTIMIZER_RUNS,
            extra_outputs: BTreeSet::new(),
        }
    }

    pub fn with_optimizer(mut self, runs: u32) -> Self {
        self.optimizer_enabled = true;
        self.optimizer_runs = runs;
        self
    }

    pub fn with_extra_output(mut self, output: impl Into<String>) -> Self {
        self.extra_outputs.insert(output.into());
        self
    }

    pub fn semver(&self) -> ConfigResult<semver::Version> {
        semver::Version::parse(&self.version).map_err(|e| ConfigError::InvalidCompilerVersion {
            version: self.version.clone(),
            reason: e.to_string(),
        })
    }
}

/// Checked, ordered set of compiler policies
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompilerPolicies {
    policies: Vec<CompilerPolicy>,
}

impl CompilerPolicies {
    /// Check versions at load time: each must parse and appear once
    pub fn new(policies: Vec<CompilerPolicy>) -> ConfigResult<Self> {
        let mut seen = HashSet::with_capacity(policies.len());
        for policy in &policies {
            policy.semver()?;
            if !seen.insert(policy.version.as_str()) {
                return Err(ConfigError::DuplicateCompilerVersion(policy.version.clone()));
            }
        }
        Ok(Self { policies })
    }

    pub fn builtin() -> ConfigResult<Self> {
        Self::new(builtin_policies())
    }

    /// Policies in declaration order
    pub fn policies(&self) -> &[CompilerPolicy] {
        &self.policies
    }

    pub fn get(&self, version: &str) -> Option<&CompilerPolicy> {
        self.policies.iter().find(|p| p.version == version)
    }

    /// Highest declared version
    pub fn latest(&self) -> Option<&CompilerPolicy> {
        self.policies
            .iter()
            .filter_map(|p| p.semver().ok().map(|v| (v, p)))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

/// Compiler versions this project builds with
pub fn builtin_policies() -> Vec<CompilerPolicy> {
    vec![
        CompilerPolicy::new("0.8.23")
            .with_optimizer(DEFAULT_OPTIMIZER_RUNS)
            .with_extra_output("storageLayout"),
        CompilerPolicy::new("0.6.12"),
        CompilerPolicy::new("0.4.17"),
        CompilerPolicy::new("0.5.16"),
    ]
}
