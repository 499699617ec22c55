//! Compatibility validation of a requested extension set.
//!
//! # Checks performed
//!
//! 1. At least one extension is requested.
//! 2. The OS identifier is recognized.
//! 3. The PHP version is recognized.
//! 4. For each extension, in request order: it exists, supports the
//!    version, and has installation data for the OS.
//! 5. No requested extension declares a conflict with another requested one.
//!
//! The first failing check aborts validation.

use std::collections::HashSet;

use vess_catalog::Catalog;
use vess_common::constants::{SUPPORTED_PHP_VERSIONS, is_supported_php_version};
use vess_common::error::ValidationError;
use vess_common::types::OsFamily;

/// Caller-supplied request, as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedSet {
    /// OS identifier, e.g. `alpine`.
    pub os: String,
    /// PHP version, e.g. `8.2`.
    pub php_version: String,
    /// Extension names in request order. Duplicates are allowed.
    pub extensions: Vec<String>,
}

impl RequestedSet {
    /// Creates a request.
    pub fn new<I, S>(os: impl Into<String>, php_version: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            os: os.into(),
            php_version: php_version.into(),
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }
}

/// A request that passed every check in [`validate`].
///
/// Only [`validate`] can build one, so holding a `ValidatedSet` means every
/// member exists in the catalog it was validated against, supports the OS
/// and version, and conflicts with no other member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSet {
    os: OsFamily,
    php_version: String,
    extensions: Vec<String>,
}

impl ValidatedSet {
    /// Target OS family.
    #[must_use]
    pub const fn os(&self) -> OsFamily {
        self.os
    }

    /// Target PHP version.
    #[must_use]
    pub fn php_version(&self) -> &str {
        &self.php_version
    }

    /// Deduplicated extension names, in first-seen request order.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

/// Validates `request` against `catalog`.
///
/// Duplicate names are collapsed to their first occurrence before any
/// per-extension check runs.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found, in the order listed in the
/// module documentation.
pub fn validate(
    catalog: &Catalog,
    request: &RequestedSet,
) -> Result<ValidatedSet, ValidationError> {
    if request.extensions.is_empty() {
        return Err(ValidationError::NoExtensions);
    }

    let os = OsFamily::from_identifier(&request.os).ok_or_else(|| {
        ValidationError::UnsupportedOs {
            os: request.os.clone(),
            supported: OsFamily::identifiers(),
        }
    })?;

    if !is_supported_php_version(&request.php_version) {
        return Err(ValidationError::UnsupportedVersion {
            version: request.php_version.clone(),
            supported: SUPPORTED_PHP_VERSIONS.join(", "),
        });
    }

    let extensions = dedup_in_order(&request.extensions);
    for name in &extensions {
        check_extension(catalog, name, os, &request.php_version)?;
    }
    check_conflicts(catalog, &extensions)?;

    tracing::debug!(
        os = %os,
        php_version = %request.php_version,
        extensions = extensions.len(),
        "extension set validated"
    );
    Ok(ValidatedSet {
        os,
        php_version: request.php_version.clone(),
        extensions,
    })
}

fn dedup_in_order(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(names.len());
    names
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}

fn check_extension(
    catalog: &Catalog,
    name: &str,
    os: OsFamily,
    php_version: &str,
) -> Result<(), ValidationError> {
    let Some(ext) = catalog.lookup(name) else {
        return Err(ValidationError::UnknownExtension {
            extension: name.to_owned(),
        });
    };

    if !ext.supports_version(php_version) {
        return Err(ValidationError::ExtensionVersion {
            extension: name.to_owned(),
            version: php_version.to_owned(),
            supported: ext.php_versions.join(", "),
        });
    }

    if ext.support_for(os).is_none() {
        return Err(ValidationError::ExtensionOs {
            extension: name.to_owned(),
            os: os.to_string(),
        });
    }

    Ok(())
}

fn check_conflicts(catalog: &Catalog, names: &[String]) -> Result<(), ValidationError> {
    let requested: HashSet<&str> = names.iter().map(String::as_str).collect();

    for name in names {
        let Some(ext) = catalog.lookup(name) else {
            continue;
        };
        if let Some(other) = ext
            .conflicts
            .iter()
            .find(|other| requested.contains(other.as_str()))
        {
            return Err(ValidationError::Conflict {
                extension: name.clone(),
                conflicts_with: other.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use vess_catalog::{Extension, OsSupport};
    use vess_common::error::ReasonCode;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().expect("builtin catalog")
    }

    fn request(os: &str, version: &str, names: &[&str]) -> RequestedSet {
        RequestedSet::new(os, version, names.iter().copied())
    }

    #[test]
    fn valid_request_passes() {
        let set = validate(&catalog(), &request("alpine", "8.2", &["mysqli", "opcache"]))
            .expect("valid");
        assert_eq!(set.os(), OsFamily::Alpine);
        assert_eq!(set.php_version(), "8.2");
        assert_eq!(set.extensions(), ["mysqli", "opcache"]);
    }

    #[test]
    fn empty_request_fails_before_anything_else() {
        let err = validate(&catalog(), &request("plan9", "1.0", &[])).expect_err("empty");
        assert_eq!(err, ValidationError::NoExtensions);
        assert_eq!(err.to_string(), "no extensions specified");
    }

    #[test]
    fn unknown_os_fails() {
        let err = validate(&catalog(), &request("debian", "8.2", &["gd"])).expect_err("os");
        assert_eq!(err.code(), ReasonCode::UnsupportedOs);
        assert!(err.to_string().contains("must be one of: alpine, ubuntu"));
    }

    #[test]
    fn unknown_version_fails_before_extension_checks() {
        let err = validate(&catalog(), &request("alpine", "9.0", &["ghost"])).expect_err("v");
        assert_eq!(err.code(), ReasonCode::UnsupportedVersion);
    }

    #[test]
    fn unknown_extension_fails_first_in_request_order() {
        let err = validate(&catalog(), &request("ubuntu", "8.3", &["A", "xmlrpc"]))
            .expect_err("unknown");
        assert_eq!(err.to_string(), "unknown extension: A");
        assert_eq!(err.extensions(), vec!["A"]);
    }

    #[test]
    fn extension_version_gate() {
        let err = validate(&catalog(), &request("ubuntu", "8.1", &["xmlrpc"])).expect_err("v");
        assert_eq!(err.code(), ReasonCode::ExtensionVersion);
        assert_eq!(
            err.to_string(),
            "extension 'xmlrpc' does not support PHP 8.1 (supported: 7.4, 8.0)"
        );
    }

    #[test]
    fn extension_without_os_entry_fails() {
        let only_alpine = Extension::new("solo", "Alpine only")
            .versions(&["8.2"])
            .support(OsFamily::Alpine, OsSupport::bundled("solo", &[], &[]));
        let catalog = Catalog::new(vec![only_alpine]).expect("catalog");

        let err = validate(&catalog, &request("ubuntu", "8.2", &["solo"])).expect_err("os");
        assert_eq!(err.code(), ReasonCode::ExtensionOs);
        assert_eq!(err.to_string(), "extension 'solo' does not support OS: ubuntu");
    }

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let set = validate(&catalog(), &request("alpine", "8.2", &["gd", "zip", "gd"]))
            .expect("valid");
        assert_eq!(set.extensions(), ["gd", "zip"]);
    }

    #[test]
    fn conflict_is_rejected_in_either_order() {
        let err = validate(&catalog(), &request("alpine", "8.3", &["swoole", "openswoole"]))
            .expect_err("conflict");
        assert_eq!(err.to_string(), "extension 'swoole' conflicts with 'openswoole'");

        let err = validate(&catalog(), &request("alpine", "8.3", &["openswoole", "swoole"]))
            .expect_err("conflict");
        assert_eq!(err.to_string(), "extension 'openswoole' conflicts with 'swoole'");
    }

    #[test]
    fn conflict_check_runs_after_per_extension_checks() {
        let err = validate(
            &catalog(),
            &request("alpine", "8.3", &["swoole", "openswoole", "ghost"]),
        )
        .expect_err("unknown first");
        assert_eq!(err.code(), ReasonCode::UnknownExtension);
    }
}
