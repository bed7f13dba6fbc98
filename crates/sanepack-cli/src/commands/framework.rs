//! Framework command implementation

use color_eyre::eyre::{Context, Result};
use sanepack_config::Config;
use sanepack_core::{Error, Frameworker, Package};
use sanepack_debian::DebianFrameworker;
use tracing::info;

/// Select the backend registered under `config.target`
pub fn backend_for(config: &Config) -> sanepack_core::Result<Box<dyn Frameworker>> {
    match config.target.as_str() {
        sanepack_debian::TARGET_NAME => Ok(Box::new(DebianFrameworker::new(
            config.project_dir.clone(),
            config.template_dir.clone(),
        ))),
        other => Err(Error::unknown_target(other)),
    }
}

/// Framework command implementation
pub struct FrameworkCommand {
    config: Config,
}

impl FrameworkCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<()> {
        self.config.validate().context("Invalid configuration")?;

        let backend = backend_for(&self.config)?;

        let package = Package::from_file(&self.config.descriptor).with_context(|| {
            format!("Failed to load descriptor {}", self.config.descriptor.display())
        })?;
        info!("Generating {} scaffold for {}", self.config.target, package.project_name);

        backend
            .framework(&package)
            .with_context(|| format!("Failed to generate {} scaffold", self.config.target))?;

        println!("✓ Generated {} scaffold for {}", self.config.target, package.project_name);
        println!("\n{}", backend.info());

        Ok(())
    }
}
