//! Main CLI entry point for sanepack

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use sanepack_config::Config;
use tracing_subscriber::EnvFilter;

mod commands;

/// sanepack - Generate packaging scaffolds from a project descriptor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    quiet: u8,

    /// Configuration file path
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a template package descriptor to edit
    Init {
        /// Output path for the descriptor
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Force overwrite existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate the packaging scaffold for a target
    Framework {
        /// Package descriptor to read
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,

        /// Packaging target
        #[arg(short, long, value_name = "NAME")]
        target: Option<String>,

        /// Template directory
        #[arg(long, value_name = "DIR")]
        templates: Option<PathBuf>,

        /// Project root where the scaffold is created
        #[arg(long, value_name = "DIR")]
        project_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet)?;

    let config = Config::load(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Init { output, force } => {
            let output = output.unwrap_or_else(|| config.descriptor.clone());
            commands::InitCommand::new(config.project_dir.clone(), output, force).execute()
        }

        Commands::Framework { file, target, templates, project_dir } => {
            let mut config = config;
            if let Some(file) = file {
                config.descriptor = file;
            }
            if let Some(target) = target {
                config.target = target;
            }
            if let Some(templates) = templates {
                config.template_dir = templates;
            }
            if let Some(project_dir) = project_dir {
                config.project_dir = project_dir;
            }
            commands::FrameworkCommand::new(config).execute()
        }
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn setup_logging(verbose: u8, quiet: u8) -> Result<()> {
    let log_level = match (verbose, quiet) {
        (0, 0) => "info",
        (1, 0) => "debug",
        (v, 0) if v > 1 => "trace",
        (0, 1) => "warn",
        (0, 2) => "error",
        (0, q) if q > 2 => "off",
        _ => "info",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    Ok(())
}
