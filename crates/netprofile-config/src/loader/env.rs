use crate::builder::RuntimeFlags;
use crate::secrets::SecretSource;

/// Set to `true` to run the local simulator on a pinned fork
pub const FORKING_VAR: &str = "FORKING";

/// Any non-empty value marks a coverage run
pub const CODE_COVERAGE_VAR: &str = "CODE_COVERAGE";

/// Environment-driven switches and overrides.
///
/// Reads go through a [`SecretSource`] so tests can use an in-memory fake.
pub struct EnvLoader;

impl EnvLoader {
    /// Read the runtime flags that affect profile building
    pub fn runtime_flags<S: SecretSource + ?Sized>(source: &S) -> RuntimeFlags {
        RuntimeFlags {
            forking_enabled: source
                .lookup(FORKING_VAR)
                .map(|value| value.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            code_coverage: source
                .lookup(CODE_COVERAGE_VAR)
                .map(|value| !value.is_empty())
                .unwrap_or(false),
        }
    }

    /// Variable that overrides a network's RPC endpoint, e.g. `GOERLI_RPC_URL`
    pub fn rpc_override_var(network: &str) -> String {
        format!("{}_RPC_URL", network.to_uppercase().replace('-', "_"))
    }

    pub fn rpc_override<S: SecretSource + ?Sized>(source: &S, network: &str) -> Option<String> {
        source
            .lookup(&Self::rpc_override_var(network))
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::MapSecretSource;

    #[test]
    fn test_flags_default_off() {
        assert_eq!(
            EnvLoader::runtime_flags(&MapSecretSource::new()),
            RuntimeFlags::default()
        );
    }

    #[test]
    fn test_forking_requires_true() {
        let source = MapSecretSource::new().with(FORKING_VAR, "TRUE");
        assert!(EnvLoader::runtime_flags(&source).forking_enabled);

        source.set(FORKING_VAR, "1");
        assert!(!EnvLoader::runtime_flags(&source).forking_enabled);
    }

    #[test]
    fn test_coverage_flag() {
        let source = MapSecretSource::new().with(CODE_COVERAGE_VAR, "1");
        assert!(EnvLoader::runtime_flags(&source).code_coverage);
        source.set(CODE_COVERAGE_VAR, "");
        assert!(!EnvLoader::runtime_flags(&source).code_coverage);
    }

    #[test]
    fn test_rpc_override_variable_name() {
        assert_eq!(EnvLoader::rpc_override_var("goerli"), "GOERLI_RPC_URL");
        assert_eq!(EnvLoader::rpc_override_var("arbitrum-one"), "ARBITRUM_ONE_RPC_URL");

        let source = MapSecretSource::new().with("GOERLI_RPC_URL", "http://node:8545");
        assert_eq!(
            EnvLoader::rpc_override(&source, "goerli").as_deref(),
            Some("http://node:8545")
        );
        assert_eq!(EnvLoader::rpc_override(&source, "mainnet"), None);
    }
}
