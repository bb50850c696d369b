/// Custom error type for the dogear library
///
/// Malformed bookmark documents and empty collections are never errors; they
/// are handled by dropping the affected group or link. Everything that does
/// reach this enum is reported upward without retries.
#[derive(Debug, thiserror::Error)]
pub enum DogearError {
    /// I/O errors (reading or writing bookmark files, config)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request errors from the content store client
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The content store answered, but not with something usable
    #[error("Failed to load data from the content store: {0}")]
    Transport(String),

    /// A tab host operation failed (open, group, update)
    ///
    /// Displayed verbatim so the message reaches the caller unchanged.
    #[error("{0}")]
    Host(String),

    /// The orchestrator service is no longer running
    #[error("Orchestrator channel closed: {0}")]
    Channel(String),

    /// Collection or site lookup failed
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing/serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Generic error for cases that don't fit other categories
    #[error("{0}")]
    Other(String),
}

/// Result type alias using DogearError
pub type Result<T> = std::result::Result<T, DogearError>;

impl From<String> for DogearError {
    fn from(s: String) -> Self {
        DogearError::Other(s)
    }
}

impl From<&str> for DogearError {
    fn from(s: &str) -> Self {
        DogearError::Other(s.to_string())
    }
}

impl From<serde_yaml::Error> for DogearError {
    fn from(err: serde_yaml::Error) -> Self {
        DogearError::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for DogearError {
    fn from(err: serde_json::Error) -> Self {
        DogearError::Json(err.to_string())
    }
}
