//! Deployment network profile resolution
//!
//! Resolves a network name into a validated [`NetworkProfile`] by merging a
//! static catalog entry, environment secrets and an optional endpoint
//! override, then checking the result against the profile invariants.

pub mod accounts;
pub mod builder;
pub mod catalog;
pub mod compiler;
pub mod error;
pub mod loader;
pub mod networks;
pub mod profile;
pub mod report;
pub mod resolver;
pub mod secrets;
pub mod template;
pub mod validator;
pub mod verification;

pub use accounts::NamedAccounts;
pub use builder::{ProfileBuilder, RuntimeFlags};
pub use catalog::{NetworkCatalog, NetworkCategory, NetworkDefinition};
pub use compiler::{CompilerPolicies, CompilerPolicy};
pub use error::{ConfigError, ConfigResult, ResolutionError, ResolutionStage, UnknownNetwork};
pub use loader::{CatalogFile, CatalogFormat, CatalogLoader, EnvLoader, FileLoader};
pub use profile::{ForkingSpec, NetworkProfile, ResolvedUrl};
pub use resolver::{DeploymentPlan, Resolver};
pub use secrets::{EnvSecretSource, MapSecretSource, SecretBundle, SecretSource, SecretValue};
pub use validator::{ProfileValidator, ValidationDefect};
pub use verification::{VerificationCredential, VerificationRegistry};
