use crate::validator::ValidationDefect;
use netprofile_utils::NetprofileError;
use thiserror::Error;

/// Load-time configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Catalog is neither TOML ({toml}) nor JSON ({json})")]
    UnrecognizedFormat { toml: String, json: String },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported catalog version {found} (supported: {supported})")]
    UnsupportedCatalogVersion { found: u32, supported: u32 },

    #[error(transparent)]
    UnknownNetwork(#[from] UnknownNetwork),

    #[error("Network '{0}' is declared more than once")]
    DuplicateNetwork(String),

    #[error("Compiler version '{0}' is declared more than once")]
    DuplicateCompilerVersion(String),

    #[error("Invalid compiler version '{version}': {reason}")]
    InvalidCompilerVersion { version: String, reason: String },

    #[error("Network '{network}' is claimed by explorer families '{first}' and '{second}'")]
    ConflictingVerificationFamily {
        network: String,
        first: String,
        second: String,
    },

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for NetprofileError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Resolution(err) => NetprofileError::Resolution(err.to_string()),
            ConfigError::FileNotFound(path) => NetprofileError::NotFound(path),
            err @ (ConfigError::Json(_)
            | ConfigError::Toml(_)
            | ConfigError::UnrecognizedFormat { .. }) => {
                NetprofileError::Serialization(err.to_string())
            }
            other => NetprofileError::Config(other.to_string()),
        }
    }
}

/// A network name that the catalog does not declare
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown network '{name}' (known networks: {})", .known.join(", "))]
pub struct UnknownNetwork {
    pub name: String,
    pub known: Vec<String>,
}

/// Stage of the resolution pipeline an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStage {
    Catalog,
    Validation,
}

/// Terminal failure of a single resolution request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error(transparent)]
    UnknownNetwork(#[from] UnknownNetwork),

    #[error(
        "Network '{network}' failed validation with {} defect(s): {}",
        .defects.len(),
        join_defects(.defects)
    )]
    Invalid {
        network: String,
        defects: Vec<ValidationDefect>,
    },
}

impl ResolutionError {
    pub fn stage(&self) -> ResolutionStage {
        match self {
            ResolutionError::UnknownNetwork(_) => ResolutionStage::Catalog,
            ResolutionError::Invalid { .. } => ResolutionStage::Validation,
        }
    }

    /// Every defect collected by the validator; empty for catalog failures
    pub fn defects(&self) -> &[ValidationDefect] {
        match self {
            ResolutionError::UnknownNetwork(_) => &[],
            ResolutionError::Invalid { defects, .. } => defects,
        }
    }

    pub fn network(&self) -> &str {
        match self {
            ResolutionError::UnknownNetwork(err) => &err.name,
            ResolutionError::Invalid { network, .. } => network,
        }
    }
}

fn join_defects(defects: &[ValidationDefect]) -> String {
    defects
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ResolutionError> for NetprofileError {
    fn from(err: ResolutionError) -> Self {
        NetprofileError::Resolution(err.to_string())
    }
}
