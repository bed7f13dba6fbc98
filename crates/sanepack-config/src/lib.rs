//! Configuration management for sanepack
//!
//! This crate handles YAML configuration parsing, validation,
//! and environment variable substitution.

use std::path::{Path, PathBuf};

use regex::Regex;
use sanepack_core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_FILE: &str = "sanepack.yaml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one template subdirectory per target
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,

    /// Project root, where the target directory is created and history is read
    #[serde(default = "default_project_dir")]
    pub project_dir: PathBuf,

    /// Package descriptor file
    #[serde(default = "default_descriptor")]
    pub descriptor: PathBuf,

    /// Packaging target name
    #[serde(default = "default_target")]
    pub target: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            project_dir: default_project_dir(),
            descriptor: default_descriptor(),
            target: default_target(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigError {
            message: format!("Failed to read config file {path:?}: {e}"),
        })?;

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigError { message: format!("Failed to parse YAML: {e}") })?;

        config.expand_env_vars()?;
        debug!("Loaded configuration from {}", path.display());

        Ok(config)
    }

    /// Load configuration, falling back to defaults.
    ///
    /// An explicitly requested file must exist. Without one, the default
    /// file is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Expand environment variables in paths
    fn expand_env_vars(&mut self) -> Result<()> {
        self.template_dir = expand_path(&self.template_dir)?;
        self.project_dir = expand_path(&self.project_dir)?;
        self.descriptor = expand_path(&self.descriptor)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.template_dir.is_dir() {
            return Err(Error::ConfigError {
                message: format!("Template directory does not exist: {:?}", self.template_dir),
            });
        }

        if !self.project_dir.is_dir() {
            return Err(Error::ConfigError {
                message: format!("Project directory does not exist: {:?}", self.project_dir),
            });
        }

        if self.target.is_empty() {
            return Err(Error::ConfigError {
                message: "Packaging target cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Expand environment variables in a path
fn expand_path(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();
    let env_var_re = Regex::new(r"\$\{([^}]+)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
        .map_err(|e| Error::ConfigError { message: format!("Invalid regex: {e}") })?;

    let mut result = path_str.to_string();
    for cap in env_var_re.captures_iter(&path_str) {
        let Some(var_name) = cap.get(1).or_else(|| cap.get(2)).map(|m| m.as_str()) else {
            continue;
        };
        let var_value = std::env::var(var_name).map_err(|_| Error::ConfigError {
            message: format!("Environment variable not found: {var_name}"),
        })?;

        result = result.replace(&cap[0], &var_value);
    }

    Ok(PathBuf::from(result))
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("./templates")
}

fn default_project_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_descriptor() -> PathBuf {
    PathBuf::from("sanepack.json")
}

fn default_target() -> String {
    "debian".to_string()
}
