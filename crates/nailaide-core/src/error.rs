use thiserror::Error;

/// Top-level error type for NailAide.
///
/// Returned by configuration loading and the storage layer. Chat-level
/// input errors live in `nailaide_chat::ChatError`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NailAideError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for NailAideError {
    fn from(err: toml::de::Error) -> Self {
        NailAideError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for NailAideError {
    fn from(err: toml::ser::Error) -> Self {
        NailAideError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for NailAideError {
    fn from(err: serde_json::Error) -> Self {
        NailAideError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for NailAide operations.
pub type Result<T> = std::result::Result<T, NailAideError>;
