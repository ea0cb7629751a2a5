//! Human-readable summaries. Secrets are shown only as fingerprints.

use crate::error::ResolutionError;
use crate::profile::NetworkProfile;
use crate::resolver::DeploymentPlan;

/// Summary of a single profile
pub fn render_profile(profile: &NetworkProfile) -> String {
    let mut report = String::new();

    report.push_str(&format!("Network: {}\n", profile.name()));
    report.push_str(&format!("Chain ID: {}\n", profile.chain_id()));
    report.push_str(&format!(
        "RPC URL: {}\n",
        profile
            .rpc_url()
            .map(|url| url.display_form())
            .unwrap_or("(provided by simulator)")
    ));
    report.push_str(&format!("Live: {}\n", profile.is_live()));
    report.push_str(&format!(
        "Persist Deployments: {}\n",
        profile.persist_deployments()
    ));

    if !profile.tags().is_empty() {
        let tags: Vec<&str> = profile.tags().iter().map(String::as_str).collect();
        report.push_str(&format!("Tags: {}\n", tags.join(", ")));
    }

    if profile.signers().is_empty() {
        report.push_str("Signers: none\n");
    } else {
        report.push_str("Signers:\n");
        for (index, signer) in profile.signers().iter().enumerate() {
            report.push_str(&format!("  [{}] {}\n", index, signer.fingerprint()));
        }
    }

    if let Some(fork) = profile.forking() {
        report.push_str("Forking:\n");
        report.push_str(&format!("  Source: {}\n", fork.source_url.display_form()));
        report.push_str(&format!("  Pinned Block: {}\n", fork.pinned_block));
    }

    if let Some(simulator) = profile.simulator() {
        report.push_str("Simulator:\n");
        report.push_str(&format!("  Hardfork: {}\n", simulator.hardfork));
        if let Some(limit) = simulator.block_gas_limit {
            report.push_str(&format!("  Block Gas Limit: {}\n", limit));
        }
        report.push_str(&format!(
            "  Unlimited Contract Size: {}\n",
            simulator.allow_unlimited_contract_size
        ));
    }

    report
}

/// Profile summary followed by verification, compiler and account settings
pub fn render_plan(plan: &DeploymentPlan) -> String {
    let mut report = render_profile(&plan.profile);

    match &plan.verification {
        Some(credential) => report.push_str(&format!(
            "Verification: {} as '{}' ({})\n",
            credential.family,
            credential.explorer_id,
            credential.api_key.fingerprint()
        )),
        None => report.push_str("Verification: skipped (no credential)\n"),
    }

    report.push_str("Compilers:\n");
    for policy in &plan.compilers {
        let optimizer = if policy.optimizer_enabled {
            format!("optimizer {} runs", policy.optimizer_runs)
        } else {
            "optimizer off".to_string()
        };
        report.push_str(&format!("  {} ({})", policy.version, optimizer));
        if !policy.extra_outputs.is_empty() {
            let outputs: Vec<&str> = policy.extra_outputs.iter().map(String::as_str).collect();
            report.push_str(&format!(" +{}", outputs.join(",")));
        }
        report.push('\n');
    }

    report.push_str("Named Accounts:\n");
    for (role, index) in plan.named_accounts.iter() {
        report.push_str(&format!("  {} -> signer[{}]\n", role, index));
    }

    report
}

/// One line per defect, or the unknown-network message
pub fn render_error(error: &ResolutionError) -> String {
    match error {
        ResolutionError::UnknownNetwork(err) => format!("{}\n", err),
        ResolutionError::Invalid { network, defects } => {
            let mut report = format!(
                "Network '{}' cannot be resolved ({} defect(s)):\n",
                network,
                defects.len()
            );
            for defect in defects {
                report.push_str(&format!("  - {}\n", defect));
            }
            report
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Resolver;
    use crate::secrets::{MapSecretSource, SIGNER_KEY_VAR};

    #[test]
    fn test_profile_report_hides_secrets() {
        let source = MapSecretSource::new()
            .with(SIGNER_KEY_VAR, "0xsupersecret")
            .with("INFURA_API_KEY", "infurasecret");
        let resolver = Resolver::builtin(source).unwrap();
        let report = render_profile(&resolver.resolve("mainnet").unwrap());

        assert!(report.contains("Network: mainnet"));
        assert!(report.contains("${INFURA_API_KEY}"));
        assert!(!report.contains("supersecret"));
        assert!(!report.contains("infurasecret"));
    }

    #[test]
    fn test_plan_report_lists_compilers() {
        let resolver = Resolver::builtin(MapSecretSource::new()).unwrap();
        let report = render_plan(&resolver.plan("hardhat", None).unwrap());
        assert!(report.contains("0.8.23 (optimizer 200 runs) +storageLayout"));
        assert!(report.contains("0.4.17 (optimizer off)"));
        assert!(report.contains("Verification: skipped"));
        assert!(report.contains("deployer -> signer[0]"));
        assert!(report.contains("Hardfork: london"));
    }

    #[test]
    fn test_error_report_lists_every_defect() {
        let resolver = Resolver::builtin(MapSecretSource::new()).unwrap();
        let err = resolver.resolve("mainnet").unwrap_err();
        let report = render_error(&err);
        assert!(report.contains("2 defect(s)"));
        assert!(report.contains("missing RPC endpoint (unset secrets: INFURA_API_KEY)"));
        assert!(report.contains("live network has no signer configured"));
    }
}
