use thiserror::Error;

/// Core error type shared across netprofile crates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetprofileError {
    /// Configuration could not be loaded or is internally inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// A network profile could not be resolved
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// Serialization/Deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input
    #[error("Invalid: {0}")]
    Invalid(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO failure, carried as text so the error stays cloneable
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for NetprofileError {
    fn from(err: std::io::Error) -> Self {
        NetprofileError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NetprofileError::Config("duplicate compiler version".to_string());
        assert_eq!(err.to_string(), "Configuration error: duplicate compiler version");

        let err = NetprofileError::NotFound("catalog.toml".to_string());
        assert_eq!(err.to_string(), "Not found: catalog.toml");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: NetprofileError = io.into();
        assert!(matches!(err, NetprofileError::Io(ref msg) if msg.contains("missing")));
    }
}
