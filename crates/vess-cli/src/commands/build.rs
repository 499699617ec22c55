//! `vess build`: build an image from a generated Dockerfile.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Args;
use vess_common::constants::DEFAULT_OUTPUT_FILE;
use vess_docker::context::build_context;
use vess_docker::{BuildEvent, BuildOptions, DockerClient};

/// Arguments for the `build` command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Dockerfile to build.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub dockerfile: PathBuf,

    /// Tag for the built image.
    #[arg(short, long)]
    pub tag: String,

    /// Do not use the build cache.
    #[arg(long)]
    pub no_cache: bool,
}

/// Executes the `build` command.
///
/// Ctrl+C replaces the default SIGINT exit: it sets a cancel flag that the
/// client polls every 250 ms, including during build steps that print
/// nothing, and the command then exits with an error.
///
/// # Errors
///
/// Returns an error if the Dockerfile cannot be packed, the engine is
/// unreachable, or the build fails.
pub fn execute(args: BuildArgs) -> anyhow::Result<()> {
    let context = build_context(&args.dockerfile)?;
    let client = DockerClient::from_env()?;
    client.ping()?;
    tracing::debug!(endpoint = %client.endpoint(), "docker engine reachable");

    let cancelled = Arc::new(AtomicBool::new(false));
    let c = Arc::clone(&cancelled);
    ctrlc::set_handler(move || {
        c.store(true, Ordering::SeqCst);
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {e}"))?;

    let options = BuildOptions {
        tag: args.tag,
        no_cache: args.no_cache,
    };
    eprintln!("Building {} from {}", options.tag, args.dockerfile.display());

    let image_id = client.build(context, &options, &cancelled, print_event)?;

    match image_id {
        Some(id) => println!("Successfully built {} ({id})", options.tag),
        None => println!("Successfully built {}", options.tag),
    }
    Ok(())
}

fn print_event(event: &BuildEvent) {
    match event {
        BuildEvent::Stream(text) => {
            print!("{text}");
            let _ = std::io::stdout().flush();
        }
        BuildEvent::Status {
            id,
            status,
            progress,
        } => {
            let id = id.as_deref().map_or_else(String::new, |id| format!("{id}: "));
            let progress = progress.as_deref().unwrap_or_default();
            eprintln!("{id}{status} {progress}");
        }
        BuildEvent::ImageId(_) | BuildEvent::Error(_) => {}
    }
}
