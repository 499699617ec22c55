//! Ubuntu layout: `apt-get`, build packages kept in the image.

use vess_common::types::OsFamily;

use super::{Layout, package_command};
use crate::recipe::RecipeData;

const APT_INSTALL: &str = "apt-get install -y --no-install-recommends";

/// Renders for Ubuntu.
///
/// `apt` has no grouped removal that is safe against packages shared with
/// the runtime set, so build packages stay installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct UbuntuLayout;

impl UbuntuLayout {
    fn uses_apt(recipe: &RecipeData) -> bool {
        !recipe.build_deps.is_empty() || !recipe.runtime_deps.is_empty()
    }
}

impl Layout for UbuntuLayout {
    fn os(&self) -> OsFamily {
        OsFamily::Ubuntu
    }

    fn prepare(&self, recipe: &RecipeData) -> Option<String> {
        Self::uses_apt(recipe).then(|| "apt-get update".to_owned())
    }

    fn install_build_deps(&self, recipe: &RecipeData) -> Option<String> {
        if recipe.build_deps.is_empty() {
            return None;
        }
        Some(package_command(APT_INSTALL, &recipe.build_deps))
    }

    fn install_runtime_deps(&self, recipe: &RecipeData) -> Option<String> {
        if recipe.runtime_deps.is_empty() {
            return None;
        }
        Some(package_command(APT_INSTALL, &recipe.runtime_deps))
    }

    fn cleanup(&self, recipe: &RecipeData) -> Option<String> {
        let mut paths = Vec::new();
        if Self::uses_apt(recipe) {
            paths.push("/var/lib/apt/lists/*");
        }
        if recipe.uses_pecl() {
            paths.push("/tmp/pear");
        }
        (!paths.is_empty()).then(|| format!("rm -rf {}", paths.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use vess_catalog::Catalog;
    use vess_common::types::ImageVariant;

    use crate::validator::RequestedSet;

    fn render(names: &[&str], variant: ImageVariant) -> String {
        let catalog = Catalog::builtin().expect("builtin catalog");
        crate::generate(
            &catalog,
            &RequestedSet::new("ubuntu", "8.3", names.iter().copied()),
            variant,
        )
        .expect("generate")
    }

    #[test]
    fn packages_are_installed_without_removal() {
        let expected = r"# Generated by vess. Do not edit by hand.
# PHP 8.3 (apache) on ubuntu
# Extensions: zip, mongodb
FROM php:8.3-apache

RUN set -eux; \
    apt-get update; \
    apt-get install -y --no-install-recommends \
        libssl-dev \
        libzip-dev; \
    docker-php-ext-install zip; \
    pecl install mongodb && docker-php-ext-enable mongodb; \
    apt-get install -y --no-install-recommends \
        libzip4; \
    rm -rf /var/lib/apt/lists/* /tmp/pear
";
        assert_eq!(render(&["zip", "mongodb"], ImageVariant::Apache), expected);
    }

    #[test]
    fn no_apt_commands_without_packages() {
        let out = render(&["bcmath", "sockets"], ImageVariant::Fpm);
        assert!(!out.contains("apt-get"));
        assert!(!out.contains("rm -rf"));
        assert!(out.ends_with("docker-php-ext-install sockets\n"));
    }

    #[test]
    fn pecl_only_cleans_pear_cache() {
        let out = render(&["redis"], ImageVariant::Cli);
        assert!(out.contains("FROM php:8.3-cli\n"));
        assert!(out.ends_with("rm -rf /tmp/pear\n"));
        assert!(!out.contains("apt-get update"));
    }
}
