//! Error types for Debian scaffold generation

use std::path::PathBuf;

use thiserror::Error;

/// Debian-specific error types
#[derive(Error, Debug)]
pub enum DebianError {
    /// A required descriptor field is absent or empty
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// Templates could not be loaded
    #[error("Failed to load templates from {path}: {reason}")]
    TemplateLoad { path: PathBuf, reason: String },

    /// No template with this name was loaded
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// A template failed to render
    #[error("Failed to render template {name}: {reason}")]
    Render { name: String, reason: String },

    /// The output directory exists from a previous run
    #[error("Directory already exists: {path}")]
    DirectoryExists { path: PathBuf },

    /// Source-control history could not be read
    #[error("Version history unavailable: {reason}")]
    HistoryUnavailable { reason: String },

    /// The derived version is not usable as a Debian version
    #[error("Invalid version format: {version} - {reason}")]
    InvalidVersion { version: String, reason: String },

    /// File system error
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Debian operations
pub type Result<T> = std::result::Result<T, DebianError>;

impl DebianError {
    /// Create a missing required field error
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create a template loading error
    pub fn template_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::TemplateLoad { path: path.into(), reason: reason.into() }
    }

    /// Create a template not found error
    pub fn template_not_found(name: impl Into<String>) -> Self {
        Self::TemplateNotFound { name: name.into() }
    }

    /// Create a render error
    pub fn render(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Render { name: name.into(), reason: reason.into() }
    }

    /// Create a history unavailable error
    pub fn history_unavailable(reason: impl Into<String>) -> Self {
        Self::HistoryUnavailable { reason: reason.into() }
    }

    /// Create an invalid version error
    pub fn invalid_version(version: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVersion { version: version.into(), reason: reason.into() }
    }
}
