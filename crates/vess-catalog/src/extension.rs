//! Extension and per-OS installation descriptors.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use vess_common::types::OsFamily;

/// Installation data for one extension on one OS family.
///
/// Its presence in [`Extension::os_support`] is what makes an extension
/// supported on that OS; empty dependency lists are still "supported".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OsSupport {
    /// System packages needed only while compiling the extension.
    pub build_deps: Vec<String>,
    /// System packages the compiled extension links against at runtime.
    pub runtime_deps: Vec<String>,
    /// Shell command that installs and enables the extension.
    pub install_cmd: String,
    /// Whether the extension is fetched from PECL rather than built from
    /// the bundled PHP sources.
    pub pecl: bool,
}

impl OsSupport {
    /// Creates a descriptor from literal package lists.
    #[must_use]
    pub fn new(build_deps: &[&str], runtime_deps: &[&str], install_cmd: &str, pecl: bool) -> Self {
        Self {
            build_deps: to_owned_list(build_deps),
            runtime_deps: to_owned_list(runtime_deps),
            install_cmd: install_cmd.to_owned(),
            pecl,
        }
    }

    /// Descriptor for an extension bundled with PHP, installed with
    /// `docker-php-ext-install`.
    #[must_use]
    pub fn bundled(name: &str, build_deps: &[&str], runtime_deps: &[&str]) -> Self {
        Self::new(
            build_deps,
            runtime_deps,
            &format!("docker-php-ext-install {name}"),
            false,
        )
    }

    /// Descriptor for a PECL extension, installed with `pecl install` and
    /// enabled with `docker-php-ext-enable`.
    #[must_use]
    pub fn pecl(name: &str, build_deps: &[&str], runtime_deps: &[&str]) -> Self {
        Self::new(
            build_deps,
            runtime_deps,
            &format!("pecl install {name} && docker-php-ext-enable {name}"),
            true,
        )
    }
}

/// A PHP extension known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extension {
    /// Unique, case-sensitive name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// PHP versions the extension can be installed on, oldest first.
    pub php_versions: Vec<String>,
    /// Installation data keyed by OS family.
    pub os_support: BTreeMap<OsFamily, OsSupport>,
    /// Names of extensions that cannot be installed alongside this one.
    pub conflicts: BTreeSet<String>,
    /// Extra `./configure` arguments passed when building the extension.
    pub configure_args: Vec<String>,
}

impl Extension {
    /// Starts a definition with no versions, OS support, or conflicts.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            php_versions: Vec::new(),
            os_support: BTreeMap::new(),
            conflicts: BTreeSet::new(),
            configure_args: Vec::new(),
        }
    }

    /// Sets the supported PHP versions.
    #[must_use]
    pub fn versions(mut self, versions: &[&str]) -> Self {
        self.php_versions = to_owned_list(versions);
        self
    }

    /// Declares conflicting extensions.
    #[must_use]
    pub fn conflicts(mut self, names: &[&str]) -> Self {
        self.conflicts = names.iter().map(|&n| n.to_owned()).collect();
        self
    }

    /// Sets extra configure arguments.
    #[must_use]
    pub fn configure_args(mut self, args: &[&str]) -> Self {
        self.configure_args = to_owned_list(args);
        self
    }

    /// Attaches installation data for `os`, replacing any previous entry.
    #[must_use]
    pub fn support(mut self, os: OsFamily, support: OsSupport) -> Self {
        let _ = self.os_support.insert(os, support);
        self
    }

    /// Whether `version` is in the supported version list.
    #[must_use]
    pub fn supports_version(&self, version: &str) -> bool {
        self.php_versions.iter().any(|v| v == version)
    }

    /// Returns the installation data for `os`, or `None` if unsupported.
    #[must_use]
    pub fn support_for(&self, os: OsFamily) -> Option<&OsSupport> {
        self.os_support.get(&os)
    }

    /// Whether this extension declares a conflict with `other`.
    #[must_use]
    pub fn conflicts_with(&self, other: &str) -> bool {
        self.conflicts.contains(other)
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|&s| s.to_owned()).collect()
}
