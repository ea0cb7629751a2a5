use crate::accounts::NamedAccounts;
use crate::catalog::NetworkDefinition;
use crate::compiler::{self, CompilerPolicy};
use crate::networks::{self, DEFAULT_NETWORK};
use crate::verification::{self, ExplorerFamily};
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Catalog file format version understood by this build
pub const CATALOG_FORMAT_VERSION: u32 = 1;

fn default_network_name() -> String {
    DEFAULT_NETWORK.to_string()
}

/// On-disk catalog: networks plus the cross-cutting settings attached to
/// every resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub version: u32,

    #[serde(default = "default_network_name")]
    pub default_network: String,

    #[serde(default)]
    pub named_accounts: NamedAccounts,

    pub networks: Vec<NetworkDefinition>,

    #[serde(default)]
    pub compilers: Vec<CompilerPolicy>,

    #[serde(default)]
    pub verification: Vec<ExplorerFamily>,
}

impl CatalogFile {
    /// The built-in catalog in file form
    pub fn builtin() -> Self {
        Self {
            version: CATALOG_FORMAT_VERSION,
            default_network: default_network_name(),
            named_accounts: NamedAccounts::default(),
            networks: networks::builtin_definitions(),
            compilers: compiler::builtin_policies(),
            verification: verification::builtin_families(),
        }
    }

    pub fn check_version(&self) -> ConfigResult<()> {
        if self.version != CATALOG_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedCatalogVersion {
                found: self.version,
                supported: CATALOG_FORMAT_VERSION,
            });
        }
        Ok(())
    }
}

/// Serialization format of a catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json,
}

impl CatalogFormat {
    /// Format named by the extension; `None` when the path has no extension
    pub fn from_path(path: &Path) -> ConfigResult<Option<Self>> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Some(CatalogFormat::Toml)),
            Some("json") => Ok(Some(CatalogFormat::Json)),
            Some(ext) => Err(ConfigError::InvalidFormat(format!(
                "Unsupported file extension: {}",
                ext
            ))),
            None => Ok(None),
        }
    }

    pub fn parse(self, content: &str) -> ConfigResult<CatalogFile> {
        let catalog: CatalogFile = match self {
            CatalogFormat::Toml => toml::from_str(content)?,
            CatalogFormat::Json => serde_json::from_str(content)?,
        };
        catalog.check_version()?;
        Ok(catalog)
    }

    pub fn render(self, catalog: &CatalogFile) -> ConfigResult<String> {
        match self {
            CatalogFormat::Toml => toml::to_string_pretty(catalog).map_err(|e| {
                ConfigError::InvalidFormat(format!("TOML serialization failed: {}", e))
            }),
            CatalogFormat::Json => Ok(serde_json::to_string_pretty(catalog)?),
        }
    }
}

/// Parse content of unknown format. A document that parses in either format
/// is judged by that format alone; when neither parses, both errors are kept.
fn sniff(content: &str) -> ConfigResult<CatalogFile> {
    let toml_err = match CatalogFormat::Toml.parse(content) {
        Err(ConfigError::Toml(err)) => err,
        other => return other,
    };
    match CatalogFormat::Json.parse(content) {
        Err(ConfigError::Json(json_err)) => Err(ConfigError::UnrecognizedFormat {
            toml: toml_err.to_string(),
            json: json_err.to_string(),
        }),
        other => other,
    }
}

/// File-based catalog loader
pub struct FileLoader;

impl FileLoader {
    pub async fn load<P: AsRef<Path>>(path: P, format: CatalogFormat) -> ConfigResult<CatalogFile> {
        let content = fs::read_to_string(path.as_ref()).await?;
        format.parse(&content)
    }

    /// Pick the format from the file extension, sniffing the content when there is none
    pub async fn load_auto<P: AsRef<Path>>(path: P) -> ConfigResult<CatalogFile> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        debug!(path = %path.display(), "loading network catalog");
        match CatalogFormat::from_path(path)? {
            Some(format) => Self::load(path, format).await,
            None => {
                let content = fs::read_to_string(path).await?;
                sniff(&content)
            }
        }
    }

    pub async fn save<P: AsRef<Path>>(
        catalog: &CatalogFile,
        path: P,
        format: CatalogFormat,
    ) -> ConfigResult<()> {
        fs::write(path, format.render(catalog)?).await?;
        Ok(())
    }

    /// Save in the format named by the file extension, TOML when there is none
    pub async fn save_auto<P: AsRef<Path>>(catalog: &CatalogFile, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        let format = CatalogFormat::from_path(path)?.unwrap_or(CatalogFormat::Toml);
        Self::save(catalog, path, format).await
    }
}
