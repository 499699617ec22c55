//! Rendering-ready recipe data.

use serde::Serialize;
use vess_catalog::Catalog;
use vess_common::error::{Result, VessError};
use vess_common::types::{ImageVariant, OsFamily};

use crate::aggregate::{self, os_support};
use crate::validator::ValidatedSet;

/// One extension installation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionStep {
    /// Extension name.
    pub name: String,
    /// Shell command that installs the extension.
    pub install_cmd: String,
    /// Whether the command fetches from PECL.
    pub pecl: bool,
}

/// Everything a layout needs to render a Dockerfile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeData {
    /// Target OS family.
    pub os: OsFamily,
    /// Target PHP version.
    pub php_version: String,
    /// Base image flavour.
    pub variant: ImageVariant,
    /// Base image reference for the `FROM` line.
    pub base_image: String,
    /// Sorted, deduplicated build-time packages.
    pub build_deps: Vec<String>,
    /// Sorted, deduplicated runtime packages.
    pub runtime_deps: Vec<String>,
    /// Install steps in validated request order.
    pub extensions: Vec<ExtensionStep>,
}

impl RecipeData {
    /// Whether any step installs from PECL.
    #[must_use]
    pub fn uses_pecl(&self) -> bool {
        self.extensions.iter().any(|step| step.pecl)
    }

    /// Extension names in install order.
    #[must_use]
    pub fn extension_names(&self) -> Vec<&str> {
        self.extensions.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Returns the official PHP base image for an OS, version, and variant.
///
/// # Errors
///
/// Returns `VessError::Config` if no base image of `variant` exists for `os`.
pub fn base_image(os: OsFamily, php_version: &str, variant: ImageVariant) -> Result<String> {
    if !variant.available_on(os) {
        return Err(VessError::Config {
            message: format!("image type {variant} is not available on {os}"),
        });
    }
    Ok(match os {
        OsFamily::Alpine => format!("php:{php_version}-{variant}-alpine"),
        OsFamily::Ubuntu => format!("php:{php_version}-{variant}"),
    })
}

/// Builds recipe data for a validated set.
///
/// # Errors
///
/// Returns `VessError::Config` if `variant` is unavailable on the set's OS,
/// and `VessError::Contract` if the catalog lacks data for a member.
pub fn build_recipe(
    catalog: &Catalog,
    set: &ValidatedSet,
    variant: ImageVariant,
) -> Result<RecipeData> {
    let os = set.os();
    let base_image = base_image(os, set.php_version(), variant)?;
    let deps = aggregate::aggregate(catalog, set)?;

    let extensions = set
        .extensions()
        .iter()
        .map(|name| {
            let support = os_support(catalog, name, os)?;
            Ok(ExtensionStep {
                name: name.clone(),
                install_cmd: support.install_cmd.clone(),
                pecl: support.pecl,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(base_image = %base_image, steps = extensions.len(), "recipe data built");
    Ok(RecipeData {
        os,
        php_version: set.php_version().to_owned(),
        variant,
        base_image,
        build_deps: deps.build,
        runtime_deps: deps.runtime,
        extensions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{RequestedSet, validate};

    fn recipe(os: &str, version: &str, names: &[&str]) -> RecipeData {
        let catalog = Catalog::builtin().expect("builtin catalog");
        let set = validate(&catalog, &RequestedSet::new(os, version, names.iter().copied()))
            .expect("valid");
        build_recipe(&catalog, &set, ImageVariant::Fpm).expect("recipe")
    }

    #[test]
    fn base_image_naming() {
        assert_eq!(
            base_image(OsFamily::Alpine, "8.2", ImageVariant::Fpm).expect("alpine"),
            "php:8.2-fpm-alpine"
        );
        assert_eq!(
            base_image(OsFamily::Ubuntu, "7.4", ImageVariant::Apache).expect("ubuntu"),
            "php:7.4-apache"
        );
        assert_eq!(
            base_image(OsFamily::Alpine, "8.3", ImageVariant::Cli).expect("cli"),
            "php:8.3-cli-alpine"
        );
    }

    #[test]
    fn apache_on_alpine_is_rejected() {
        let err = base_image(OsFamily::Alpine, "8.2", ImageVariant::Apache).expect_err("apache");
        assert!(err.to_string().contains("not available on alpine"));
    }

    #[test]
    fn steps_keep_request_order() {
        let data = recipe("alpine", "8.2", &["redis", "mysqli", "opcache"]);
        assert_eq!(data.extension_names(), vec!["redis", "mysqli", "opcache"]);
        assert!(data.uses_pecl());
        assert_eq!(
            data.extensions[0].install_cmd,
            "pecl install redis && docker-php-ext-enable redis"
        );
    }

    #[test]
    fn base_image_ignores_extensions() {
        let a = recipe("ubuntu", "8.1", &["gd"]);
        let b = recipe("ubuntu", "8.1", &["redis", "zip"]);
        assert_eq!(a.base_image, b.base_image);
    }

    #[test]
    fn recipe_serializes_to_json() {
        let data = recipe("alpine", "8.2", &["zip"]);
        let json = serde_json::to_string(&data).expect("json");
        assert!(json.contains("\"os\":\"alpine\""));
        assert!(json.contains("\"build_deps\":[\"libzip-dev\"]"));
    }
}
