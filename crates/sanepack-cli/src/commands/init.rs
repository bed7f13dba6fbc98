//! Init command implementation

use std::path::PathBuf;

use color_eyre::eyre::{Context, Result};
use sanepack_core::Package;
use tracing::info;

/// Init command implementation
pub struct InitCommand {
    project_dir: PathBuf,
    output_path: PathBuf,
    force: bool,
}

impl InitCommand {
    pub fn new(project_dir: PathBuf, output_path: PathBuf, force: bool) -> Self {
        Self { project_dir, output_path, force }
    }

    pub fn execute(&self) -> Result<()> {
        info!("Writing template descriptor to {}", self.output_path.display());

        if self.output_path.exists() && !self.force {
            return Err(color_eyre::eyre::eyre!(
                "Descriptor already exists: {}. Use --force to overwrite.",
                self.output_path.display()
            ));
        }

        let project_dir = std::fs::canonicalize(&self.project_dir).with_context(|| {
            format!("Failed to resolve project directory {}", self.project_dir.display())
        })?;

        let package =
            Package::template(&project_dir).context("Failed to build template descriptor")?;

        package
            .to_file(&self.output_path)
            .with_context(|| format!("Failed to write {}", self.output_path.display()))?;

        println!("✓ Created package descriptor: {}", self.output_path.display());
        println!("\nNext steps:");
        println!("1. Fill in the descriptor, at least the description and dependencies");
        println!("2. Tag a release in git, for example 'git tag v0.1.0'");
        println!("3. Run 'sanepack framework -f {}'", self.output_path.display());

        Ok(())
    }
}
