//! Merged, read-only extension catalog.
//!
//! A [`Catalog`] is built once, checked against its authoring invariants,
//! and then shared by reference with every resolution request. Nothing
//! mutates it after construction, so concurrent readers need no locking.

use std::collections::{BTreeSet, HashMap};

use vess_common::constants::{SUPPORTED_PHP_VERSIONS, is_supported_php_version};
use vess_common::error::{Result, VessError};
use vess_common::types::OsFamily;

use crate::data::{self, SubCatalog};
use crate::extension::Extension;

/// Lookup table from extension name to [`Extension`].
#[derive(Debug, Clone)]
pub struct Catalog {
    extensions: HashMap<String, Extension>,
}

impl Catalog {
    /// Builds the catalog from the literal data shipped with vess.
    ///
    /// # Errors
    ///
    /// Returns `VessError::Catalog` if the literal data breaks an authoring
    /// invariant (see [`Catalog::new`]).
    pub fn builtin() -> Result<Self> {
        let sub_catalogs = OsFamily::ALL.map(|os| (os, data::sub_catalog(os)));
        Self::from_parts(data::definitions(), sub_catalogs)
    }

    /// Merges per-OS sub-catalogs into extension definitions and checks the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns `VessError::Catalog` if a sub-catalog names an unknown
    /// extension, lists an extension twice, or if the merged catalog fails
    /// [`Catalog::new`].
    pub fn from_parts(
        definitions: Vec<Extension>,
        sub_catalogs: impl IntoIterator<Item = (OsFamily, SubCatalog)>,
    ) -> Result<Self> {
        let mut by_name: HashMap<String, Extension> = HashMap::with_capacity(definitions.len());
        for ext in definitions {
            if by_name.contains_key(&ext.name) {
                return Err(catalog_err(format!("duplicate extension name: {}", ext.name)));
            }
            let _ = by_name.insert(ext.name.clone(), ext);
        }

        for (os, entries) in sub_catalogs {
            for (name, support) in entries {
                let Some(ext) = by_name.get_mut(&name) else {
                    return Err(catalog_err(format!(
                        "{os} sub-catalog has an entry for unknown extension: {name}"
                    )));
                };
                if ext.os_support.insert(os, support).is_some() {
                    return Err(catalog_err(format!(
                        "{os} sub-catalog lists extension {name} more than once"
                    )));
                }
            }
        }

        Self::new(by_name.into_values().collect())
    }

    /// Builds a catalog from fully populated extensions.
    ///
    /// # Checks performed
    ///
    /// 1. Extension names are unique.
    /// 2. Every declared PHP version is a recognized version.
    /// 3. No extension lists itself as a conflict.
    /// 4. Every conflict names a known extension.
    /// 5. Conflicts are declared on both sides.
    ///
    /// # Errors
    ///
    /// Returns `VessError::Catalog` on the first violated check, visiting
    /// extensions in name order.
    pub fn new(extensions: Vec<Extension>) -> Result<Self> {
        let mut map = HashMap::with_capacity(extensions.len());
        for ext in extensions {
            let name = ext.name.clone();
            if map.insert(name.clone(), ext).is_some() {
                return Err(catalog_err(format!("duplicate extension name: {name}")));
            }
        }

        let catalog = Self { extensions: map };
        for ext in catalog.iter() {
            check_versions(ext)?;
            check_conflicts(&catalog, ext)?;
        }

        tracing::debug!(extensions = catalog.len(), "extension catalog built");
        Ok(catalog)
    }

    /// Returns the extension named `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Extension> {
        self.extensions.get(name)
    }

    /// Whether `name` exists and supports PHP `version`.
    #[must_use]
    pub fn supports_version(&self, name: &str, version: &str) -> bool {
        self.lookup(name)
            .is_some_and(|ext| ext.supports_version(version))
    }

    /// Whether `name` exists and has installation data for `os`.
    #[must_use]
    pub fn supports_os(&self, name: &str, os: OsFamily) -> bool {
        self.lookup(name)
            .is_some_and(|ext| ext.support_for(os).is_some())
    }

    /// All extension names, sorted.
    #[must_use]
    pub fn all_names(&self) -> BTreeSet<&str> {
        self.extensions.keys().map(String::as_str).collect()
    }

    /// Iterates over extensions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Extension> {
        let mut exts: Vec<&Extension> = self.extensions.values().collect();
        exts.sort_by(|a, b| a.name.cmp(&b.name));
        exts.into_iter()
    }

    /// Number of extensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Whether the catalog has no extensions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

fn check_versions(ext: &Extension) -> Result<()> {
    for version in &ext.php_versions {
        if !is_supported_php_version(version) {
            return Err(catalog_err(format!(
                "extension {} declares unrecognized PHP version {version} (recognized: {})",
                ext.name,
                SUPPORTED_PHP_VERSIONS.join(", ")
            )));
        }
    }
    Ok(())
}

fn check_conflicts(catalog: &Catalog, ext: &Extension) -> Result<()> {
    for other in &ext.conflicts {
        if *other == ext.name {
            return Err(catalog_err(format!(
                "extension {} lists itself as a conflict",
                ext.name
            )));
        }
        let Some(other_ext) = catalog.lookup(other) else {
            return Err(catalog_err(format!(
                "extension {} conflicts with unknown extension {other}",
                ext.name
            )));
        };
        if !other_ext.conflicts_with(&ext.name) {
            return Err(catalog_err(format!(
                "conflict {} -> {other} is not declared by {other}",
                ext.name
            )));
        }
    }
    Ok(())
}

fn catalog_err(message: String) -> VessError {
    VessError::Catalog { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::OsSupport;

    fn make_ext(name: &str, conflicts: &[&str]) -> Extension {
        Extension::new(name, format!("{name} extension"))
            .versions(&["8.2", "8.3"])
            .conflicts(conflicts)
            .support(OsFamily::Alpine, OsSupport::bundled(name, &[], &[]))
    }

    #[test]
    fn builtin_catalog_passes_authoring_checks() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        assert_eq!(catalog.len(), 23);
        assert!(catalog.lookup("mysqli").is_some());
    }

    #[test]
    fn builtin_catalog_supports_both_os_families_everywhere() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        for name in catalog.all_names() {
            for os in OsFamily::ALL {
                assert!(catalog.supports_os(name, os), "{name} missing {os}");
            }
        }
    }

    #[test]
    fn xmlrpc_is_limited_to_old_versions() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        assert!(catalog.supports_version("xmlrpc", "8.0"));
        assert!(!catalog.supports_version("xmlrpc", "8.1"));
        assert!(!catalog.supports_version("xmlrpc", "8.3"));
    }

    #[test]
    fn queries_on_unknown_names_are_false_not_errors() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        assert!(catalog.lookup("nope").is_none());
        assert!(!catalog.supports_version("nope", "8.2"));
        assert!(!catalog.supports_os("nope", OsFamily::Alpine));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        assert!(catalog.lookup("GD").is_none());
    }

    #[test]
    fn iter_is_sorted_by_name() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        let names: Vec<&str> = catalog.iter().map(|e| e.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn reciprocal_conflicts_are_accepted() {
        let catalog = Catalog::new(vec![make_ext("a", &["b"]), make_ext("b", &["a"])])
            .expect("reciprocal conflicts are valid");
        assert!(catalog.lookup("a").expect("a").conflicts_with("b"));
    }

    #[test]
    fn one_sided_conflict_is_rejected() {
        let err = Catalog::new(vec![make_ext("a", &["b"]), make_ext("b", &[])])
            .expect_err("asymmetric conflict");
        let msg = err.to_string();
        assert!(msg.contains("not declared by b"), "got: {msg}");
    }

    #[test]
    fn self_conflict_is_rejected() {
        let err = Catalog::new(vec![make_ext("a", &["a"])]).expect_err("self conflict");
        assert!(err.to_string().contains("lists itself"));
    }

    #[test]
    fn conflict_with_unknown_extension_is_rejected() {
        let err = Catalog::new(vec![make_ext("a", &["ghost"])]).expect_err("unknown conflict");
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Catalog::new(vec![make_ext("a", &[]), make_ext("a", &[])])
            .expect_err("duplicate");
        assert!(err.to_string().contains("duplicate extension name: a"));
    }

    #[test]
    fn unrecognized_version_is_rejected() {
        let ext = Extension::new("a", "A").versions(&["9.9"]);
        let err = Catalog::new(vec![ext]).expect_err("bad version");
        assert!(err.to_string().contains("9.9"));
    }

    #[test]
    fn sub_catalog_for_unknown_extension_is_rejected() {
        let defs = vec![Extension::new("a", "A").versions(&["8.2"])];
        let alpine = vec![("ghost".to_owned(), OsSupport::bundled("ghost", &[], &[]))];
        let err = Catalog::from_parts(defs, [(OsFamily::Alpine, alpine)])
            .expect_err("unknown sub-catalog entry");
        assert!(err.to_string().contains("alpine sub-catalog"));
    }

    #[test]
    fn sub_catalog_duplicate_entry_is_rejected() {
        let defs = vec![Extension::new("a", "A").versions(&["8.2"])];
        let alpine = vec![
            ("a".to_owned(), OsSupport::bundled("a", &[], &[])),
            ("a".to_owned(), OsSupport::bundled("a", &["x"], &[])),
        ];
        let err = Catalog::from_parts(defs, [(OsFamily::Alpine, alpine)])
            .expect_err("duplicate sub-catalog entry");
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn sub_catalogs_merge_per_extension() {
        let defs = vec![Extension::new("a", "A").versions(&["8.2"])];
        let alpine = vec![("a".to_owned(), OsSupport::bundled("a", &["a-dev"], &[]))];
        let ubuntu = vec![("a".to_owned(), OsSupport::bundled("a", &["liba-dev"], &[]))];
        let catalog = Catalog::from_parts(
            defs,
            [(OsFamily::Alpine, alpine), (OsFamily::Ubuntu, ubuntu)],
        )
        .expect("merge");

        let ext = catalog.lookup("a").expect("a");
        assert_eq!(ext.os_support.len(), 2);
        assert_eq!(
            ext.support_for(OsFamily::Ubuntu).expect("ubuntu").build_deps,
            vec!["liba-dev"]
        );
    }
}
