//! Alpine layout: `apk` with a virtual build-dependency group.

use vess_common::types::OsFamily;

use super::{Layout, package_command};
use crate::recipe::RecipeData;

/// Name of the virtual package grouping the build-time packages.
const BUILD_GROUP: &str = ".build-deps";

/// Renders for Alpine. PECL builds need the image's `$PHPIZE_DEPS`
/// toolchain, which joins the removable build group.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlpineLayout;

impl AlpineLayout {
    fn build_packages(recipe: &RecipeData) -> Vec<String> {
        let mut packages = Vec::with_capacity(recipe.build_deps.len() + 1);
        if recipe.uses_pecl() {
            packages.push("$PHPIZE_DEPS".to_owned());
        }
        packages.extend(recipe.build_deps.iter().cloned());
        packages
    }
}

impl Layout for AlpineLayout {
    fn os(&self) -> OsFamily {
        OsFamily::Alpine
    }

    fn install_build_deps(&self, recipe: &RecipeData) -> Option<String> {
        let packages = Self::build_packages(recipe);
        if packages.is_empty() {
            return None;
        }
        Some(package_command(
            &format!("apk add --no-cache --virtual {BUILD_GROUP}"),
            &packages,
        ))
    }

    fn install_runtime_deps(&self, recipe: &RecipeData) -> Option<String> {
        if recipe.runtime_deps.is_empty() {
            return None;
        }
        Some(package_command("apk add --no-cache", &recipe.runtime_deps))
    }

    fn strip_build_deps(&self, recipe: &RecipeData) -> Option<String> {
        if Self::build_packages(recipe).is_empty() {
            return None;
        }
        Some(format!("apk del --no-network {BUILD_GROUP}"))
    }

    fn cleanup(&self, recipe: &RecipeData) -> Option<String> {
        recipe.uses_pecl().then(|| "rm -rf /tmp/pear".to_owned())
    }
}
