//! `vess generate`: resolve an env file into a Dockerfile.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use vess_catalog::Catalog;
use vess_common::config::VessConfig;
use vess_common::types::ImageVariant;
use vess_engine::render::render_recipe;
use vess_engine::{RecipeData, RequestedSet, envfile, resolve};

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Env file with a `PHP_EXTENSIONS` entry [default: .env].
    #[arg(short, long)]
    pub env_file: Option<PathBuf>,

    /// Where to write the Dockerfile [default: Dockerfile].
    #[arg(short = 'f', long)]
    pub output: Option<PathBuf>,

    /// Base image type (cli, fpm, apache) [default: fpm].
    #[arg(short = 't', long = "type")]
    pub variant: Option<ImageVariant>,

    /// Print the resolved recipe as JSON instead of writing a Dockerfile.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `generate` command.
///
/// # Errors
///
/// Returns an error if the env file cannot be read, the request is rejected,
/// or the Dockerfile cannot be written.
pub fn execute(
    args: GenerateArgs,
    catalog: &Catalog,
    mut config: VessConfig,
) -> anyhow::Result<()> {
    if let Some(env_file) = args.env_file {
        config.env_file = env_file;
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(variant) = args.variant {
        config.variant = variant;
    }

    tracing::info!(env_file = %config.env_file.display(), "reading requested extensions");
    let input = envfile::parse_env_file(&config.env_file)?;
    let request = RequestedSet::new(&config.os, &config.php_version, input.extensions);
    let recipe = resolve(catalog, &request, config.variant)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
        return Ok(());
    }

    write_dockerfile(&recipe, &config)?;
    println!(
        "Generated {} for PHP {} ({}) on {}",
        config.output.display(),
        recipe.php_version,
        recipe.variant,
        recipe.os
    );
    println!("  extensions: {}", recipe.extension_names().join(", "));
    Ok(())
}

fn write_dockerfile(recipe: &RecipeData, config: &VessConfig) -> anyhow::Result<()> {
    let dockerfile = render_recipe(recipe);
    std::fs::write(&config.output, dockerfile)
        .with_context(|| format!("failed to write {}", config.output.display()))?;
    tracing::info!(
        output = %config.output.display(),
        base_image = %recipe.base_image,
        extensions = %recipe.extension_names().join(", "),
        "Dockerfile generated"
    );
    Ok(())
}
