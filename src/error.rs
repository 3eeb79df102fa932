use thiserror::Error;

/// Unified error type for xutlversion operations
#[derive(Error, Debug)]
pub enum XutlError {
    #[error("http status: {status}")]
    Registry { status: u16 },

    #[error("no version found")]
    NoVersionFound,

    #[error("invalid version found: {0}")]
    InvalidVersion(String),

    #[error("failed to increment {0}")]
    Increment(String),

    #[error("Argument error: {0}")]
    Argument(String),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in xutlversion
pub type Result<T> = std::result::Result<T, XutlError>;

impl XutlError {
    /// Create a registry error for an unexpected HTTP status
    pub fn registry(status: u16) -> Self {
        XutlError::Registry { status }
    }

    /// Create an invalid version error naming the offending string
    pub fn invalid_version(raw: impl Into<String>) -> Self {
        XutlError::InvalidVersion(raw.into())
    }

    /// Create an increment error naming the version that could not be bumped
    pub fn increment(version: impl Into<String>) -> Self {
        XutlError::Increment(version.into())
    }

    /// Create an argument error with context
    pub fn argument(msg: impl Into<String>) -> Self {
        XutlError::Argument(msg.into())
    }

    /// Create a path error with context
    pub fn path(msg: impl Into<String>) -> Self {
        XutlError::Path(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        XutlError::Manifest(msg.into())
    }

    /// Create a command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        XutlError::Command(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        XutlError::Config(msg.into())
    }
}
