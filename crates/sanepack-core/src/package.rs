//! Package descriptor representation

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Describes a project for packaging.
///
/// Required fields use plain types. `build_depends` and `depends` must be
/// present in a persisted descriptor even when empty, while the optional
/// relationship lists distinguish "omitted" (`None`) from an explicitly
/// empty list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Package {
    /// Name of the project as it should appear on the final package
    pub project_name: String,

    /// Owners of the project
    #[serde(default)]
    pub project_owners: Vec<Person>,

    /// Person who maintains the package, possibly distinct from the owners
    pub maintainer: Person,

    /// Brief, one line description
    pub description: String,

    /// Extended description, may span several lines
    #[serde(default)]
    pub long_description: Option<String>,

    /// Link (HTTP or HTTPS) to the project homepage
    #[serde(default)]
    pub homepage: Option<String>,

    /// Repository section, such as "devel"
    pub section: String,

    /// Installation priority, usually "optional"
    pub priority: String,

    /// Processor architecture: "any" for portable compiled code, "all" for
    /// interpreted code
    pub architecture: String,

    /// Packages required to build this one
    pub build_depends: Vec<String>,

    /// Packages required to run this one
    pub depends: Vec<String>,

    /// Packages recommended alongside this one
    #[serde(default)]
    pub recommends: Option<Vec<String>>,

    /// Packages suggested alongside this one
    #[serde(default)]
    pub suggests: Option<Vec<String>>,

    /// Packages that cannot be installed together with this one
    #[serde(default)]
    pub conflicts: Option<Vec<String>>,

    /// Virtual packages this one provides
    #[serde(default)]
    pub provides: Option<Vec<String>>,

    /// Packages this one replaces
    #[serde(default)]
    pub replaces: Option<Vec<String>>,

    /// Copyright and licensing terms
    pub copyright: Copyright,

    /// Manpage paths relative to the project root, named like "name.1"
    #[serde(default)]
    pub man_pages: Vec<String>,

    /// Non-manpage documentation paths relative to the project root
    #[serde(default)]
    pub docs: Vec<String>,

    /// Init script to install alongside the package
    #[serde(default)]
    pub init_script: Option<PathBuf>,
}

/// A name and contact address
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    /// Display name
    pub name: String,

    /// Contact email address
    pub email: String,
}

/// Licensing information for the project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Copyright {
    /// Upstream project name
    pub name: String,

    /// Default license identifier, such as "GPL-3.0+"
    pub license: String,

    /// Upstream homepage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    /// Per-file copyright terms
    #[serde(default)]
    pub files: Vec<FileCopyright>,
}

/// Copyright terms for the files matching a glob
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileCopyright {
    pub glob: String,
    pub license: String,
    pub year: i32,
    pub owner: Person,
}

impl Person {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { name: name.into(), email: email.into() }
    }

    /// Read the current user's identity from the global git configuration.
    ///
    /// Values git cannot provide are left empty.
    pub fn from_git_config() -> Self {
        Self { name: git_config_value("user.name"), email: git_config_value("user.email") }
    }

    /// Both name and email are set
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty()
    }
}

fn git_config_value(key: &str) -> String {
    match Command::new("git").args(["config", "--global", key]).output() {
        Ok(output) if output.status.success() => {
            let value = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
            debug!("Found git {key}: {value:?}");
            value
        }
        Ok(output) => {
            debug!("Could not get git {key}: exit status {}", output.status);
            String::new()
        }
        Err(e) => {
            debug!("Could not get git {key}: {e}");
            String::new()
        }
    }
}

impl Package {
    /// Load a descriptor from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let package = serde_json::from_str(&content)?;
        debug!("Loaded package descriptor from {}", path.display());
        Ok(package)
    }

    /// Write the descriptor as pretty-printed JSON
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        std::fs::write(path, content)?;
        debug!("Wrote package descriptor to {}", path.display());
        Ok(())
    }

    /// Build a descriptor filled with placeholders for the user to edit.
    ///
    /// The project name is taken from the directory name and the owner and
    /// maintainer from the git configuration.
    pub fn template(project_dir: &Path) -> Result<Self> {
        let project_name = project_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidPackage {
                reason: format!("cannot derive a project name from {}", project_dir.display()),
            })?;
        debug!("Found project name: {project_name:?}");

        let user = Person::from_git_config();
        if !user.is_complete() {
            warn!("git user.name or user.email is unset, fill in the maintainer by hand");
        }
        let year = chrono::Local::now().year();

        Ok(Self {
            copyright: Copyright {
                name: project_name.clone(),
                license: "abbreviated license name (such as GPL-3.0+)".to_string(),
                homepage: None,
                files: vec![FileCopyright {
                    glob: "*".to_string(),
                    license: "GPL-3.0+".to_string(),
                    year,
                    owner: user.clone(),
                }],
            },
            project_name,
            project_owners: vec![user.clone()],
            maintainer: user,
            description: String::new(),
            long_description: None,
            homepage: None,
            section: "main".to_string(),
            priority: "optional".to_string(),
            architecture: "any".to_string(),
            build_depends: vec!["package for your compiler here".to_string()],
            depends: vec!["package(s) required to run this package".to_string()],
            recommends: None,
            suggests: None,
            conflicts: None,
            provides: None,
            replaces: None,
            man_pages: vec!["path/to/manpage.1".to_string()],
            docs: Vec::new(),
            init_script: None,
        })
    }
}
