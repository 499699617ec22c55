//! Union of system packages needed by a validated extension set.

use std::collections::BTreeSet;

use serde::Serialize;
use vess_catalog::{Catalog, OsSupport};
use vess_common::error::{Result, VessError};
use vess_common::types::OsFamily;

use crate::validator::ValidatedSet;

/// Deduplicated system packages, sorted lexicographically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dependencies {
    /// Packages needed only while compiling extensions.
    pub build: Vec<String>,
    /// Packages needed by the installed extensions at runtime.
    pub runtime: Vec<String>,
}

/// Collects build and runtime packages for every extension in `set`.
///
/// Output order depends only on the package names, never on the request
/// order.
///
/// # Errors
///
/// Returns `VessError::Contract` if an extension in `set` is missing from
/// `catalog` or has no entry for the set's OS.
pub fn aggregate(catalog: &Catalog, set: &ValidatedSet) -> Result<Dependencies> {
    let mut build = BTreeSet::new();
    let mut runtime = BTreeSet::new();

    for name in set.extensions() {
        let support = os_support(catalog, name, set.os())?;
        build.extend(support.build_deps.iter().cloned());
        runtime.extend(support.runtime_deps.iter().cloned());
    }

    tracing::debug!(
        build = build.len(),
        runtime = runtime.len(),
        "aggregated system packages"
    );
    Ok(Dependencies {
        build: build.into_iter().collect(),
        runtime: runtime.into_iter().collect(),
    })
}

/// Resolves the installation data of a validated extension.
///
/// # Errors
///
/// Returns `VessError::Contract` if the data is missing, which means the set
/// was validated against a different catalog.
pub(crate) fn os_support<'a>(
    catalog: &'a Catalog,
    name: &str,
    os: OsFamily,
) -> Result<&'a OsSupport> {
    catalog
        .lookup(name)
        .and_then(|ext| ext.support_for(os))
        .ok_or_else(|| VessError::Contract {
            message: format!("validated extension {name} has no installation data for {os}"),
        })
}

#[cfg(test)]
mod tests {
    use vess_catalog::Extension;

    use super::*;
    use crate::validator::{RequestedSet, validate};

    fn deps_for(os: &str, names: &[&str]) -> Dependencies {
        let catalog = Catalog::builtin().expect("builtin catalog");
        let set = validate(&catalog, &RequestedSet::new(os, "8.2", names.iter().copied()))
            .expect("valid");
        aggregate(&catalog, &set).expect("aggregate")
    }

    #[test]
    fn extensions_without_packages_contribute_nothing() {
        let deps = deps_for("alpine", &["mysqli", "opcache"]);
        assert!(deps.build.is_empty());
        assert!(deps.runtime.is_empty());
    }

    #[test]
    fn shared_packages_collapse() {
        let deps = deps_for("alpine", &["pgsql", "pdo_pgsql"]);
        assert_eq!(deps.build, vec!["postgresql-dev"]);
        assert_eq!(deps.runtime, vec!["postgresql-libs"]);
    }

    #[test]
    fn packages_are_sorted_regardless_of_request_order() {
        let forward = deps_for("ubuntu", &["zip", "gd", "intl"]);
        let backward = deps_for("ubuntu", &["intl", "gd", "zip"]);
        assert_eq!(forward, backward);

        let mut sorted = forward.build.clone();
        sorted.sort();
        assert_eq!(forward.build, sorted);
    }

    #[test]
    fn packages_follow_the_requested_os() {
        let alpine = deps_for("alpine", &["intl"]);
        let ubuntu = deps_for("ubuntu", &["intl"]);
        assert_eq!(alpine.build, vec!["icu-dev"]);
        assert_eq!(ubuntu.build, vec!["libicu-dev"]);
    }

    #[test]
    fn set_from_another_catalog_is_a_contract_violation() {
        let builtin = Catalog::builtin().expect("builtin catalog");
        let set = validate(&builtin, &RequestedSet::new("alpine", "8.2", ["gd"])).expect("valid");

        let other = Catalog::new(vec![Extension::new("gd", "GD").versions(&["8.2"])])
            .expect("catalog");
        let err = aggregate(&other, &set).expect_err("contract");
        assert!(matches!(err, VessError::Contract { .. }));
    }
}
