//! # vess-engine
//!
//! Turns a requested set of PHP extensions into a Dockerfile.
//!
//! Handles:
//! - **Envfile**: `KEY=VALUE` input files naming the requested extensions.
//! - **Validator**: OS, version, and conflict checks against the catalog.
//! - **Aggregate**: Deduplicated build and runtime system packages.
//! - **Recipe**: Rendering-ready data (base image, packages, install steps).
//! - **Render**: Per-OS Dockerfile layouts.
//!
//! Every stage is a pure function of its inputs and a shared
//! [`Catalog`](vess_catalog::Catalog); no stage mutates shared state.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod aggregate;
pub mod envfile;
pub mod recipe;
pub mod render;
pub mod validator;

use vess_catalog::Catalog;
use vess_common::error::Result;
use vess_common::types::ImageVariant;

pub use recipe::RecipeData;
pub use validator::{RequestedSet, ValidatedSet};

/// Validates a request and builds its recipe data for `variant`.
///
/// # Errors
///
/// Returns `VessError::Validation` if the request is rejected,
/// `VessError::Config` if `variant` has no base image on the requested OS,
/// and `VessError::Contract` if the catalog lacks data it claimed to have.
pub fn resolve(
    catalog: &Catalog,
    request: &RequestedSet,
    variant: ImageVariant,
) -> Result<RecipeData> {
    let validated = validator::validate(catalog, request)?;
    recipe::build_recipe(catalog, &validated, variant)
}

/// Resolves a request and renders it with its OS layout.
///
/// # Errors
///
/// Returns any error from [`resolve`].
pub fn generate(
    catalog: &Catalog,
    request: &RequestedSet,
    variant: ImageVariant,
) -> Result<String> {
    let recipe = resolve(catalog, request, variant)?;
    Ok(render::render_recipe(&recipe))
}
