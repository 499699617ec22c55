//! Build-context archives.
//!
//! A context holds exactly one entry, the Dockerfile, with fixed metadata
//! so the same recipe always yields the same archive bytes.

use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use vess_common::constants::CONTEXT_DOCKERFILE_NAME;
use vess_common::error::{Result, VessError};

/// Packs `content` as the context's Dockerfile.
///
/// # Errors
///
/// Returns `VessError::Io` if the archive cannot be written.
pub fn context_from_str(content: &str) -> Result<Vec<u8>> {
    let io_err = |e| VessError::io(CONTEXT_DOCKERFILE_NAME, e);

    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let data = content.as_bytes();
    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(0);
    header.set_cksum();
    builder
        .append_data(&mut header, CONTEXT_DOCKERFILE_NAME, data)
        .map_err(io_err)?;

    let encoder = builder.into_inner().map_err(io_err)?;
    let archive = encoder.finish().map_err(io_err)?;
    tracing::debug!(bytes = archive.len(), "build context packed");
    Ok(archive)
}

/// Reads a Dockerfile from disk and packs it.
///
/// # Errors
///
/// Returns `VessError::Io` if the file cannot be read or packed.
pub fn build_context(dockerfile: &Path) -> Result<Vec<u8>> {
    tracing::info!(dockerfile = %dockerfile.display(), "creating build context");
    let content = std::fs::read_to_string(dockerfile).map_err(|e| VessError::io(dockerfile, e))?;
    context_from_str(&content)
}
