//! Error types for the core library

use thiserror::Error;

/// Core error type for sanepack operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid package descriptor
    #[error("Invalid package descriptor: {reason}")]
    InvalidPackage { reason: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// No backend is registered under the requested target name
    #[error("Unknown packaging target: {target}")]
    UnknownTarget { target: String },

    /// A packaging backend failed
    #[error("{target} backend failed: {source}")]
    Backend {
        target: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type alias for sanepack operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a backend-specific error
    pub fn backend<E>(target: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend { target: target.into(), source: Box::new(source) }
    }

    /// Create an unknown target error
    pub fn unknown_target(target: impl Into<String>) -> Self {
        Self::UnknownTarget { target: target.into() }
    }
}
