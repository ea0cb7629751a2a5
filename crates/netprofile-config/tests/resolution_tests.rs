use netprofile_config::catalog::{known_chain_id, ForkDefinition, LOCAL_PERSIST_TAG};
use netprofile_config::loader::env::FORKING_VAR;
use netprofile_config::secrets::{FORKING_API_KEY_VAR, SIGNER_KEY_VAR};
use netprofile_config::*;

fn all_secrets() -> MapSecretSource {
    MapSecretSource::new()
        .with(SIGNER_KEY_VAR, "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d")
        .with("INFURA_API_KEY", "infura-project-id")
        .with(FORKING_API_KEY_VAR, "alchemy-key")
}

/// Every combination of present/absent secrets and the forking switch
fn secret_combinations() -> Vec<MapSecretSource> {
    let mut sources = Vec::new();
    for mask in 0..16u8 {
        let source = MapSecretSource::new();
        if mask & 1 != 0 {
            source.set(SIGNER_KEY_VAR, "0xkey");
        }
        if mask & 2 != 0 {
            source.set("INFURA_API_KEY", "infura");
        }
        if mask & 4 != 0 {
            source.set(FORKING_API_KEY_VAR, "alchemy");
        }
        if mask & 8 != 0 {
            source.set(FORKING_VAR, "true");
        }
        sources.push(source);
    }
    sources
}

fn assert_invariants(profile: &NetworkProfile, definition: &NetworkDefinition) {
    assert_eq!(profile.name(), definition.name);
    assert_eq!(profile.chain_id(), definition.chain_id);
    if let Some(known) = known_chain_id(&definition.name) {
        assert_eq!(profile.chain_id(), known);
    }

    if definition.category.is_live() {
        assert!(profile.is_live(), "{} must be live", definition.name);
        assert!(!profile.signers().is_empty(), "{} needs a signer", definition.name);
        assert!(profile.rpc_url().is_some(), "{} needs an endpoint", definition.name);
    } else {
        assert!(!profile.is_live());
        assert!(profile.signers().is_empty());
    }

    assert_eq!(
        profile.persist_deployments(),
        profile.is_live() || definition.has_tag(LOCAL_PERSIST_TAG)
    );

    if let Some(fork) = profile.forking() {
        assert!(fork.enabled);
        assert!(fork.pinned_block > 0);
        assert!(!fork.source_url.as_str().is_empty());
        assert!(!profile.is_live());
    }
}

/// Resolution never yields a profile that breaks an invariant
#[test]
fn test_every_network_resolves_valid_or_reports_defects() {
    for source in secret_combinations() {
        let resolver = Resolver::builtin(source).unwrap();
        for definition in resolver.list_networks() {
            match resolver.resolve(&definition.name) {
                Ok(profile) => assert_invariants(&profile, definition),
                Err(err) => {
                    assert_eq!(err.stage(), ResolutionStage::Validation);
                    assert!(!err.defects().is_empty(), "{}", definition.name);
                }
            }
        }
    }
}

#[test]
fn test_all_networks_resolve_with_full_secrets() {
    let resolver = Resolver::builtin(all_secrets()).unwrap();
    for definition in resolver.list_networks() {
        let profile = resolver
            .resolve(&definition.name)
            .unwrap_or_else(|e| panic!("{}: {}", definition.name, e));
        assert_invariants(&profile, definition);
    }
}

#[test]
fn test_resolution_is_idempotent() {
    let resolver = Resolver::builtin(all_secrets()).unwrap();
    let first = resolver.resolve("mainnet").unwrap();
    let second = resolver.resolve("mainnet").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_live_network_without_signer_fails() {
    let source = all_secrets();
    source.unset(SIGNER_KEY_VAR);
    let resolver = Resolver::builtin(source).unwrap();

    for name in ["mainnet", "goerli", "polygon", "arbitrumone"] {
        let err = resolver.resolve(name).unwrap_err();
        assert!(
            err.defects().contains(&ValidationDefect::MissingSigner),
            "{}: {:?}",
            name,
            err
        );
    }
}

#[test]
fn test_empty_signer_counts_as_absent() {
    let source = all_secrets().with(SIGNER_KEY_VAR, "");
    let resolver = Resolver::builtin(source).unwrap();
    let err = resolver.resolve("goerli").unwrap_err();
    assert_eq!(err.defects(), &[ValidationDefect::MissingSigner]);
}

#[test]
fn test_local_network_ignores_signer() {
    for source in [MapSecretSource::new(), all_secrets()] {
        let resolver = Resolver::builtin(source).unwrap();
        for name in ["hardhat", "localhost"] {
            let profile = resolver.resolve(name).unwrap();
            assert!(!profile.is_live());
            assert!(profile.signers().is_empty());
        }
    }
}

#[test]
fn test_localhost_persists_and_hardhat_does_not() {
    let resolver = Resolver::builtin(MapSecretSource::new()).unwrap();
    assert!(resolver.resolve("localhost").unwrap().persist_deployments());
    assert!(!resolver.resolve("hardhat").unwrap().persist_deployments());
}

#[test]
fn test_missing_infura_key_reports_endpoint_with_context() {
    let source = all_secrets();
    source.unset("INFURA_API_KEY");
    let resolver = Resolver::builtin(source).unwrap();

    let err = resolver.resolve("kovan").unwrap_err();
    assert_eq!(
        err.defects(),
        &[ValidationDefect::MissingEndpoint {
            missing_secrets: vec!["INFURA_API_KEY".to_string()]
        }]
    );

    // Networks with keyless endpoints are unaffected
    assert!(resolver.resolve("fantom").is_ok());
}

#[test]
fn test_every_defect_reported_at_once() {
    let resolver = Resolver::builtin(MapSecretSource::new()).unwrap();
    let err = resolver.resolve("goerli").unwrap_err();
    assert_eq!(err.network(), "goerli");
    assert_eq!(err.defects().len(), 2);
    assert!(err.defects().contains(&ValidationDefect::MissingSigner));
    assert!(err
        .defects()
        .iter()
        .any(|d| matches!(d, ValidationDefect::MissingEndpoint { .. })));
}

#[test]
fn test_forked_hardhat_is_pinned() {
    let source = all_secrets().with(FORKING_VAR, "true");
    let resolver = Resolver::builtin(source).unwrap();
    let profile = resolver.resolve("hardhat").unwrap();
    let fork = profile.forking().unwrap();
    assert_eq!(fork.pinned_block, 15_759_970);
    assert_eq!(
        fork.source_url.as_str(),
        "https://eth-mainnet.alchemyapi.io/v2/alchemy-key"
    );

    // Same configuration, same forked state
    assert_eq!(resolver.resolve("hardhat").unwrap(), profile);
}

#[test]
fn test_forking_without_archive_key_fails() {
    let source = MapSecretSource::new().with(FORKING_VAR, "true");
    let resolver = Resolver::builtin(source).unwrap();
    let err = resolver.resolve("hardhat").unwrap_err();
    assert_eq!(
        err.defects(),
        &[ValidationDefect::MissingForkSource {
            missing_secrets: vec![FORKING_API_KEY_VAR.to_string()]
        }]
    );
}

#[test]
fn test_fork_pinned_at_zero_is_invalid() {
    let mut file = CatalogFile::builtin();
    for network in file.networks.iter_mut().filter(|n| n.name == "hardhat") {
        network.forking = Some(ForkDefinition {
            source_template: "https://archive.example/rpc".to_string(),
            pinned_block: 0,
        });
    }
    let source = MapSecretSource::new().with(FORKING_VAR, "true");
    let resolver = Resolver::from_catalog_file(file, source).unwrap();

    let err = resolver.resolve("hardhat").unwrap_err();
    assert_eq!(err.defects(), &[ValidationDefect::InvalidForkBlock { block: 0 }]);
}

#[test]
fn test_forking_a_live_network_conflicts() {
    let mut file = CatalogFile::builtin();
    for network in file.networks.iter_mut().filter(|n| n.name == "mainnet") {
        network.forking = Some(ForkDefinition {
            source_template: "https://archive.example/rpc".to_string(),
            pinned_block: 11_829_739,
        });
    }
    let source = all_secrets().with(FORKING_VAR, "true");
    let resolver = Resolver::from_catalog_file(file, source).unwrap();

    let err = resolver.resolve("mainnet").unwrap_err();
    assert_eq!(err.defects(), &[ValidationDefect::ConflictingForkAndLive]);
}

#[test]
fn test_contradictory_chain_id_detected() {
    let mut file = CatalogFile::builtin();
    for network in file.networks.iter_mut().filter(|n| n.name == "binance") {
        network.chain_id = 97;
    }
    let resolver = Resolver::from_catalog_file(file, all_secrets()).unwrap();
    let err = resolver.resolve("binance").unwrap_err();
    assert_eq!(
        err.defects(),
        &[ValidationDefect::ChainIdMismatch {
            declared: 97,
            known: 56
        }]
    );
}

#[test]
fn test_duplicate_compiler_version_fails_at_load() {
    let mut file = CatalogFile::builtin();
    file.compilers.push(CompilerPolicy::new("0.6.12").with_optimizer(999));
    let err = Resolver::from_catalog_file(file, all_secrets()).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateCompilerVersion(v) if v == "0.6.12"));
}

#[test]
fn test_unknown_network_lists_valid_names() {
    let resolver = Resolver::builtin(all_secrets()).unwrap();
    let err = resolver.resolve("sepolia").unwrap_err();
    assert_eq!(err.stage(), ResolutionStage::Catalog);
    match err {
        ResolutionError::UnknownNetwork(unknown) => {
            assert_eq!(unknown.name, "sepolia");
            assert_eq!(unknown.known, resolver.catalog().names());
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_list_networks_is_stable() {
    let resolver = Resolver::builtin(MapSecretSource::new()).unwrap();
    let first: Vec<String> = resolver.list_networks().map(|d| d.name.clone()).collect();
    let second: Vec<String> = resolver.list_networks().map(|d| d.name.clone()).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), resolver.catalog().len());

    let mut unique = first.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), first.len());
    assert_eq!(&first[..3], &["localhost", "hardhat", "mainnet"]);
}

#[test]
fn test_rotated_secrets_are_picked_up() {
    let source = std::sync::Arc::new(all_secrets());
    let resolver = Resolver::builtin(std::sync::Arc::clone(&source)).unwrap();

    let before = resolver.resolve("goerli").unwrap();
    source.set(SIGNER_KEY_VAR, "0xrotated");
    let after = resolver.resolve("goerli").unwrap();

    assert_ne!(before, after);
    assert_eq!(after.signers()[0].expose(), "0xrotated");

    source.unset(SIGNER_KEY_VAR);
    assert!(resolver.resolve("goerli").is_err());
}

#[test]
fn test_concurrent_resolution() {
    let resolver = std::sync::Arc::new(Resolver::builtin(all_secrets()).unwrap());
    let handles: Vec<_> = ["mainnet", "goerli", "hardhat", "polygon"]
        .into_iter()
        .map(|name| {
            let resolver = std::sync::Arc::clone(&resolver);
            std::thread::spawn(move || resolver.resolve(name).map(|p| p.name().to_string()))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
}

#[test]
fn test_verification_credential_falls_back_to_none() {
    let resolver = Resolver::builtin(all_secrets()).unwrap();
    assert!(resolver.verification_credential("mainnet").is_none());

    let resolver = resolver.with_secrets(all_secrets().with("ETHERSCAN_API_KEY", "scan"));
    let credential = resolver.verification_credential("mainnet").unwrap();
    assert_eq!(credential.family, "etherscan");
    assert_eq!(credential.api_key.expose(), "scan");
}

#[test]
fn test_rpc_url_override_token_never_printed() {
    let token = "SECRETTOKEN123";
    let source = all_secrets().with(
        "POLYGON_RPC_URL",
        format!("https://purple.matic.quiknode.pro/{}/", token),
    );
    let resolver = Resolver::builtin(source).unwrap();
    let plan = resolver.plan("polygon", None).unwrap();

    assert_eq!(
        plan.profile.rpc_url().map(|u| u.as_str()),
        Some("https://purple.matic.quiknode.pro/SECRETTOKEN123/")
    );
    assert!(!report::render_plan(&plan).contains(token));
    assert!(!serde_json::to_string(&plan).unwrap().contains(token));
    assert!(!format!("{:?}", plan).contains(token));

    let profile = resolver
        .resolve_with_override("polygon", Some("https://rpc.example/v1/explicit-token"))
        .unwrap();
    assert!(!report::render_profile(&profile).contains("explicit-token"));
    assert!(!format!("{:?}", profile).contains("explicit-token"));
}
