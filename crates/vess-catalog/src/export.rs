//! JSON-ready metadata views over the catalog.
//!
//! Exports list every extension installable for an (OS, PHP version) pair,
//! with its dependencies and install command for that OS.

use std::collections::BTreeMap;

use serde::Serialize;
use vess_common::constants::{SUPPORTED_PHP_VERSIONS, is_supported_php_version};
use vess_common::error::{Result, VessError};
use vess_common::types::OsFamily;

use crate::catalog::Catalog;

/// Metadata for one extension on one OS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionExport {
    /// Extension name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Build-time system packages on this OS.
    pub build_dependencies: Vec<String>,
    /// Runtime system packages on this OS.
    pub runtime_dependencies: Vec<String>,
    /// Install command on this OS.
    pub install_command: String,
    /// Whether the extension comes from PECL.
    pub pecl_install: bool,
    /// Every PHP version the extension supports.
    pub supported_php_versions: Vec<String>,
    /// Conflicting extensions.
    pub conflicts: Vec<String>,
    /// Extra configure arguments.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub configure_args: Vec<String>,
}

/// Exported metadata for one (OS, PHP version) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportData {
    /// OS identifier.
    pub os: OsFamily,
    /// PHP version.
    pub php_version: String,
    /// Installable extensions, sorted by name.
    pub extensions: Vec<ExtensionExport>,
}

/// Exported metadata for every (OS, PHP version) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllExportData {
    /// Keyed by OS, then PHP version.
    pub data: BTreeMap<OsFamily, BTreeMap<String, ExportData>>,
}

/// Counts derived from an [`ExportData`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    /// Number of exported extensions.
    pub total_extensions: usize,
    /// How many come from PECL.
    pub pecl_extensions: usize,
    /// How many are bundled with PHP.
    pub core_extensions: usize,
    /// Exported names, in export order.
    pub extension_names: Vec<String>,
}

impl ExportSummary {
    /// Summarizes `data`.
    #[must_use]
    pub fn from_data(data: &ExportData) -> Self {
        let pecl_extensions = data.extensions.iter().filter(|e| e.pecl_install).count();
        Self {
            total_extensions: data.extensions.len(),
            pecl_extensions,
            core_extensions: data.extensions.len() - pecl_extensions,
            extension_names: data.extensions.iter().map(|e| e.name.clone()).collect(),
        }
    }
}

/// Exports every extension installable on `os` with PHP `php_version`.
///
/// # Errors
///
/// Returns `VessError::Config` if `os` or `php_version` is not recognized.
pub fn export(catalog: &Catalog, os: &str, php_version: &str) -> Result<ExportData> {
    let os: OsFamily = os.parse()?;
    if !is_supported_php_version(php_version) {
        return Err(VessError::Config {
            message: format!(
                "unsupported PHP version: {php_version} (must be one of: {})",
                SUPPORTED_PHP_VERSIONS.join(", ")
            ),
        });
    }
    Ok(export_for(catalog, os, php_version))
}

/// Exports every (OS, PHP version) combination.
#[must_use]
pub fn export_all(catalog: &Catalog) -> AllExportData {
    let data = OsFamily::ALL
        .into_iter()
        .map(|os| {
            let per_version = SUPPORTED_PHP_VERSIONS
                .iter()
                .map(|&v| (v.to_owned(), export_for(catalog, os, v)))
                .collect();
            (os, per_version)
        })
        .collect();
    AllExportData { data }
}

/// Serializes any export view as indented JSON.
///
/// # Errors
///
/// Returns `VessError::Serialization` if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn export_for(catalog: &Catalog, os: OsFamily, php_version: &str) -> ExportData {
    let extensions = catalog
        .iter()
        .filter(|ext| ext.supports_version(php_version))
        .filter_map(|ext| {
            let support = ext.support_for(os)?;
            Some(ExtensionExport {
                name: ext.name.clone(),
                description: ext.description.clone(),
                build_dependencies: support.build_deps.clone(),
                runtime_dependencies: support.runtime_deps.clone(),
                install_command: support.install_cmd.clone(),
                pecl_install: support.pecl,
                supported_php_versions: ext.php_versions.clone(),
                conflicts: ext.conflicts.iter().cloned().collect(),
                configure_args: ext.configure_args.clone(),
            })
        })
        .collect();

    tracing::debug!(os = %os, php_version, "exported extension metadata");
    ExportData {
        os,
        php_version: php_version.to_owned(),
        extensions,
    }
}
