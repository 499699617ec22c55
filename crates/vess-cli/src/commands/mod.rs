//! CLI command definitions and dispatch.

pub mod build;
pub mod export;
pub mod extensions;
pub mod generate;
pub mod images;

use clap::{Parser, Subcommand};
use vess_catalog::Catalog;
use vess_common::config::VessConfig;

/// Generate Dockerfiles for PHP extensions.
#[derive(Parser, Debug)]
#[command(name = "vess", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Target OS (alpine, ubuntu).
    #[arg(short, long, global = true, env = "VESS_OS")]
    pub os: Option<String>,

    /// Target PHP version.
    #[arg(short, long, global = true, env = "VESS_PHP_VERSION")]
    pub php_version: Option<String>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Default configuration with the global flags applied.
    pub fn config(&self) -> VessConfig {
        let mut config = VessConfig::default();
        if let Some(os) = &self.os {
            config.os.clone_from(os);
        }
        if let Some(version) = &self.php_version {
            config.php_version.clone_from(version);
        }
        config
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a Dockerfile from the extensions listed in an env file.
    Generate(generate::GenerateArgs),
    /// Export extension metadata as JSON.
    Export(export::ExportArgs),
    /// Build an image from a generated Dockerfile.
    Build(build::BuildArgs),
    /// List or remove images on the Docker engine.
    Images(images::ImagesArgs),
    /// List extensions available for the target OS and PHP version.
    Extensions(extensions::ExtensionsArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config();
    tracing::debug!(os = %config.os, php_version = %config.php_version, "configuration loaded");

    match cli.command {
        Command::Generate(args) => generate::execute(args, &Catalog::builtin()?, config),
        Command::Export(args) => export::execute(args, &Catalog::builtin()?, &config),
        Command::Build(args) => build::execute(args),
        Command::Images(args) => images::execute(args),
        Command::Extensions(args) => extensions::execute(&args, &Catalog::builtin()?, &config),
    }
}
