//! # vess-catalog
//!
//! The immutable catalog of PHP extensions known to vess.
//!
//! Handles:
//! - **Extension**: Identity, supported PHP versions, conflicts, and per-OS
//!   installation descriptors.
//! - **Data**: Literal extension definitions plus one sub-catalog per OS family.
//! - **Catalog**: Merged, authoring-checked lookup table built once per process.
//! - **Export**: JSON-ready metadata views over the catalog.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod catalog;
pub mod data;
pub mod export;
pub mod extension;

pub use catalog::Catalog;
pub use extension::{Extension, OsSupport};
