//! Debian packaging backend for sanepack
//!
//! This crate turns a [`sanepack_core::Package`] into the `debian/`
//! directory `dpkg-buildpackage` expects.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use sanepack_core::{Frameworker, Package};
//! use sanepack_debian::DebianFrameworker;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let package = Package::from_file("sanepack.json")?;
//! let backend = DebianFrameworker::new(".", "/usr/share/sanepack/templates");
//!
//! backend.framework(&package)?;
//! println!("{}", backend.info());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`control`]: debian/control field assembly
//! - [`error`]: Error types and result handling
//! - [`framework`]: The [`DebianFrameworker`] backend
//! - [`history`]: Version and changelog derivation from git
//! - [`template`]: Template loading and rendering

pub mod control;
pub mod error;
pub mod framework;
pub mod history;
pub mod template;

// Re-export commonly used types
pub use control::{concat, ControlFile, ControlIncludes};
pub use error::{DebianError, Result};
pub use framework::{DebianFrameworker, DEBIAN_INFO, TARGET_NAME};
pub use history::{ChangelogFile, GitHistory, HistorySource, VersionHistory};
pub use template::{TemplateRenderer, TemplateSet};
