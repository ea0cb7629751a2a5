use anyhow::{bail, Context, Result};
use netprofile_config::report;
use netprofile_config::{
    CatalogFile, CatalogLoader, EnvSecretSource, FileLoader, NetworkCategory, Resolver,
};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Load `.env` into the process environment; a missing file is fine
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "ignoring unreadable .env file"),
    }
}

async fn resolver(catalog: Option<PathBuf>) -> Result<Resolver<EnvSecretSource>> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let file = CatalogLoader::load(catalog.as_deref(), &cwd)
        .await
        .context("failed to load network catalog")?;
    Resolver::from_catalog_file(file, EnvSecretSource).context("invalid network catalog")
}

pub async fn list(catalog: Option<PathBuf>, category: Option<NetworkCategory>) -> Result<()> {
    let resolver = resolver(catalog).await?;
    println!("{:<16} {:>10}  {:<8} TAGS", "NETWORK", "CHAIN ID", "CATEGORY");
    let networks = resolver
        .list_networks()
        .filter(|definition| category.map_or(true, |c| definition.category == c));
    for definition in networks {
        let tags: Vec<&str> = definition.tags.iter().map(String::as_str).collect();
        let marker = if definition.name == resolver.default_network() {
            " (default)"
        } else {
            ""
        };
        println!(
            "{:<16} {:>10}  {:<8} {}{}",
            definition.name,
            definition.chain_id,
            definition.category,
            tags.join(","),
            marker
        );
    }
    Ok(())
}

pub async fn resolve(
    catalog: Option<PathBuf>,
    network: Option<String>,
    rpc_url: Option<String>,
    json: bool,
) -> Result<()> {
    let resolver = resolver(catalog).await?;
    let network = network.unwrap_or_else(|| resolver.default_network().to_string());

    let plan = match resolver.plan(&network, rpc_url.as_deref()) {
        Ok(plan) => plan,
        Err(err) => {
            eprint!("{}", report::render_error(&err));
            bail!("resolution of '{}' failed", network);
        }
    };

    if plan.verification.is_none() && plan.profile.is_live() {
        warn!(network = %network, "no verification credential configured; contract verification will be skipped");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", report::render_plan(&plan));
    }
    Ok(())
}

pub async fn compilers(catalog: Option<PathBuf>) -> Result<()> {
    let resolver = resolver(catalog).await?;
    for policy in resolver.compiler_policies() {
        let outputs: Vec<&str> = policy.extra_outputs.iter().map(String::as_str).collect();
        println!(
            "{:<10} optimizer={:<5} runs={:<6} outputs={}",
            policy.version,
            policy.optimizer_enabled,
            policy.optimizer_runs,
            outputs.join(",")
        );
    }
    if let Some(latest) = resolver.latest_compiler() {
        println!("latest: {}", latest.version);
    }
    Ok(())
}

pub async fn verify_key(catalog: Option<PathBuf>, network: String) -> Result<()> {
    let resolver = resolver(catalog).await?;
    resolver.catalog().get(&network)?;

    match resolver.verification_credential(&network) {
        Some(credential) => println!(
            "{}: {} credential present ({}, explorer id '{}')",
            network,
            credential.family,
            credential.api_key.fingerprint(),
            credential.explorer_id
        ),
        None => {
            match resolver.verification_registry().family_for(&network) {
                Some(family) => warn!(
                    network = %network,
                    variable = %family.api_key_var,
                    "verification credential not set; verification will be skipped"
                ),
                None => warn!(network = %network, "no explorer family covers this network"),
            }
            println!("{}: no verification credential", network);
        }
    }
    Ok(())
}

pub async fn init(path: PathBuf) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    FileLoader::save_auto(&CatalogFile::builtin(), &path)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("wrote built-in catalog to {}", path.display());
    Ok(())
}
