//! Catalog loading and environment handling

pub mod env;
pub mod file;

pub use env::EnvLoader;
pub use file::{CatalogFile, CatalogFormat, FileLoader, CATALOG_FORMAT_VERSION};

use crate::ConfigResult;
use std::path::{Path, PathBuf};
use tracing::info;

/// File names probed when no catalog path is given
pub const CATALOG_FILE_NAMES: [&str; 2] = ["netprofile.toml", "netprofile.json"];

/// Locates and loads the network catalog
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load `path` if given, else the first catalog file found in `dir`,
    /// else the built-in catalog
    pub async fn load<P: AsRef<Path>>(path: Option<P>, dir: &Path) -> ConfigResult<CatalogFile> {
        if let Some(path) = path {
            return FileLoader::load_auto(path).await;
        }

        match Self::find_in(dir) {
            Some(found) => {
                info!(path = %found.display(), "using catalog file");
                FileLoader::load_auto(found).await
            }
            None => Ok(CatalogFile::builtin()),
        }
    }

    /// First catalog file present in `dir`
    pub fn find_in(dir: &Path) -> Option<PathBuf> {
        CATALOG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }
}
